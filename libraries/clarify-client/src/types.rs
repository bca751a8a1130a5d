//! Types for Clarify API requests and responses.

use serde_json::Value;

/// Default API host.
pub const DEFAULT_HOST: &str = "https://api.clarify.io";

/// API version prefix for the fixed collection roots.
pub const API_VERSION: &str = "v1";

/// A parsed HAL+JSON resource as returned by the server.
pub type Resource = Value;

/// Configuration for connecting to the Clarify API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host every href is resolved against (e.g., "https://api.clarify.io")
    pub host: String,
    /// API key sent as a bearer token. Requests without a key are sent
    /// unauthenticated and rejected by the server.
    pub api_key: Option<String>,
}

impl ClientConfig {
    /// Create a config for the default host with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: Some(api_key.into()),
        }
    }

    /// Create a config without an API key.
    pub fn anonymous() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: None,
        }
    }

    /// Point the client at another host (test servers, staging).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::anonymous()
    }
}

// =============================================================================
// Bundle Types
// =============================================================================

/// Fields for creating a bundle. Every field is optional; only the ones
/// that are set are sent.
#[derive(Debug, Clone, Default)]
pub struct NewBundle {
    pub name: Option<String>,
    /// Public URL of the media file
    pub media_url: Option<String>,
    /// Channel(s) to use in a stereo file ("left", "right", "split")
    pub audio_channel: Option<String>,
    /// Arbitrary JSON, serialized before it is sent
    pub metadata: Option<Value>,
    pub notify_url: Option<String>,
    pub external_id: Option<String>,
}

/// Sparse update of a bundle. Omitted fields are left untouched
/// server-side.
#[derive(Debug, Clone, Default)]
pub struct BundleUpdate {
    pub name: Option<String>,
    pub notify_url: Option<String>,
    pub external_id: Option<String>,
    /// Expected object version; a mismatch fails with `409 Conflict`
    pub version: Option<i64>,
}

// =============================================================================
// Track Types
// =============================================================================

/// Fields for adding a track to a bundle.
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub media_url: String,
    /// Short name for the track
    pub label: Option<String>,
    pub audio_channel: Option<String>,
}

impl NewTrack {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
            label: None,
            audio_channel: None,
        }
    }
}

// =============================================================================
// Search Types
// =============================================================================

/// Search terms. Only used for the first page of results: later pages carry
/// the server-generated search state in their hrefs.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub query_fields: Option<String>,
    pub filter: Option<String>,
    pub language: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_fields: None,
            filter: None,
            language: None,
        }
    }

    pub fn with_fields(mut self, query_fields: impl Into<String>) -> Self {
        self.query_fields = Some(query_fields.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
