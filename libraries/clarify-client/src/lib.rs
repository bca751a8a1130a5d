//! Clarify API Client
//!
//! Blocking HTTP client for the Clarify hypermedia (HAL+JSON) audio API.
//!
//! # Features
//!
//! - **Navigation**: follow `_links` and read `_embedded` resources by relation
//! - **Embeds**: negotiate the `embed` parameter, including on pagination links
//! - **Resources**: bundles, tracks, metadata, insights and search
//! - **Pagination**: walk every item of a collection with early stop
//!
//! # Example
//!
//! ```ignore
//! use clarify_client::{hal, ClarifyClient, ClientConfig, EmbedFlags};
//! use std::ops::ControlFlow;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClarifyClient::new(ClientConfig::new("my-api-key"))?;
//!
//!     client.bundle_list_map(
//!         |client, href| {
//!             let bundle = client.get_bundle(href, EmbedFlags::none().tracks(true))?;
//!             let tracks = hal::embedded(&bundle, "clarify:tracks");
//!             println!("{} has tracks: {}", href, tracks.is_some());
//!             Ok(ControlFlow::Continue(()))
//!         },
//!         None,
//!     )?;
//!
//!     Ok(())
//! }
//! ```

mod bundles;
mod client;
pub mod embed;
mod error;
pub mod global;
pub mod hal;
mod insights;
mod metadata;
pub mod pagination;
pub mod query;
mod tracks;
pub mod transport;
mod types;

// Re-export main types
pub use client::{parse_resource, ClarifyClient, DELETED_STATUS, SUCCESS_STATUSES};
pub use embed::{compose, override_embed, Embed, EmbedFlags};
pub use error::{ApiFailure, ClarifyError, Result, DECODE_MESSAGE};
pub use insights::INSIGHT_PREFIX;
pub use pagination::for_each;
pub use transport::{ApiRequest, Fields, HttpTransport, Method, RawResponse, Transport};
pub use types::{
    BundleUpdate, ClientConfig, NewBundle, NewTrack, Resource, SearchQuery, API_VERSION,
    DEFAULT_HOST,
};
