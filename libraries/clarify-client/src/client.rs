//! Main Clarify API client.

use crate::error::{ApiFailure, ClarifyError, Result};
use crate::transport::{ApiRequest, Fields, HttpTransport, Method, RawResponse, Transport};
use crate::types::{ClientConfig, Resource, API_VERSION};
use std::cell::Cell;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

/// Statuses accepted from GET, POST and PUT.
pub const SUCCESS_STATUSES: RangeInclusive<u16> = 200..=202;

/// The only status accepted from DELETE.
pub const DELETED_STATUS: u16 = 204;

/// Client for the Clarify API.
///
/// Every operation issues one blocking request and waits for the full
/// response. The status of the most recent response is kept in
/// [`ClarifyClient::last_status`] and overwritten by the next request, so
/// one client must not be shared between threads (it is `!Sync`).
///
/// # Example
///
/// ```ignore
/// use clarify_client::{ClarifyClient, ClientConfig, EmbedFlags, hal};
///
/// let client = ClarifyClient::new(ClientConfig::new("my-api-key"))?;
/// let page = client.get_bundle_list(None, Some(10), EmbedFlags::none())?;
/// for href in hal::item_hrefs(&page) {
///     let bundle = client.get_bundle(href, EmbedFlags::none().tracks(true))?;
///     println!("{}", bundle["name"]);
/// }
/// ```
pub struct ClarifyClient {
    transport: Box<dyn Transport>,
    last_status: Cell<Option<u16>>,
}

impl ClarifyClient {
    /// Create a client with its own connection pool.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!(
            host = %transport.host(),
            authenticated = config.api_key.is_some(),
            "Created Clarify client"
        );
        Ok(Self::with_transport(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            last_status: Cell::new(None),
        }
    }

    /// Status code of the most recent response, if any request completed.
    pub fn last_status(&self) -> Option<u16> {
        self.last_status.get()
    }

    // =========================================================================
    // HTTP verbs
    // =========================================================================

    /// Executes a GET. `fields` are appended to the path as query parameters.
    pub fn get(&self, path: &str, fields: Fields) -> Result<RawResponse> {
        self.execute(Method::Get, path, fields)
    }

    /// Executes a POST with a form-encoded body.
    pub fn post(&self, path: &str, fields: Fields) -> Result<RawResponse> {
        self.execute(Method::Post, path, fields)
    }

    /// Executes a PUT with a form-encoded body.
    pub fn put(&self, path: &str, fields: Fields) -> Result<RawResponse> {
        self.execute(Method::Put, path, fields)
    }

    /// Executes a DELETE, with a form-encoded body when `fields` is not empty.
    pub fn delete(&self, path: &str, fields: Fields) -> Result<RawResponse> {
        self.execute(Method::Delete, path, fields)
    }

    fn execute(&self, method: Method, path: &str, fields: Fields) -> Result<RawResponse> {
        let request = ApiRequest::new(method, path, fields);
        let response = self.transport.execute(&request)?;
        self.last_status.set(Some(response.status));
        Ok(response)
    }

    // =========================================================================
    // Status contracts
    // =========================================================================

    /// Run a GET/POST/PUT and parse its body as a resource.
    pub(crate) fn fetch(&self, method: Method, path: &str, fields: Fields) -> Result<Resource> {
        let response = self.execute(method, path, fields)?;
        let body = expect_success(method, path, response)?;
        parse_resource(&body)
    }

    /// Run a DELETE, which must answer exactly `204 No Content`.
    pub(crate) fn remove(&self, path: &str, fields: Fields) -> Result<()> {
        let response = self.execute(Method::Delete, path, fields)?;
        if response.status == DELETED_STATUS {
            debug!(path = %path, "Resource deleted");
            Ok(())
        } else {
            warn!(method = "DELETE", path = %path, status = response.status, "Unexpected status");
            Err(ClarifyError::Api(ApiFailure::new(
                response.status,
                response.body,
            )))
        }
    }
}

fn expect_success(method: Method, path: &str, response: RawResponse) -> Result<String> {
    if SUCCESS_STATUSES.contains(&response.status) {
        Ok(response.body)
    } else {
        warn!(method = %method, path = %path, status = response.status, "Unexpected status");
        Err(ClarifyError::Api(ApiFailure::new(
            response.status,
            response.body,
        )))
    }
}

/// Parse a response body into a resource.
pub fn parse_resource(body: &str) -> Result<Resource> {
    serde_json::from_str(body).map_err(|e| ClarifyError::decode(body, e))
}

/// Absolute path of a fixed collection root, e.g. `/v1/bundles`.
pub(crate) fn collection_path(collection: &str) -> String {
    format!("/{}/{}", API_VERSION, collection)
}

pub(crate) fn require_href(href: &str) -> Result<()> {
    if href.is_empty() {
        Err(ClarifyError::InvalidArgument("href cannot be empty".into()))
    } else {
        Ok(())
    }
}

pub(crate) fn require_limit(limit: Option<u32>) -> Result<()> {
    match limit {
        Some(0) => Err(ClarifyError::InvalidArgument(
            "limit must be greater than zero".into(),
        )),
        _ => Ok(()),
    }
}

/// Push `key=value` when `value` is present.
pub(crate) fn push_field(fields: &mut Fields, key: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        fields.push((key.to_string(), value.to_string()));
    }
}
