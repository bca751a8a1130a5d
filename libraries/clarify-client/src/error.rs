//! Error types for the Clarify client.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message attached to every [`ClarifyError::Decode`].
pub const DECODE_MESSAGE: &str = "Unable to convert JSON response body to a resource";

/// Errors that can occur when interacting with the Clarify API.
#[derive(Error, Debug)]
pub enum ClarifyError {
    /// Server answered with a status outside the expected success range
    #[error("{0}")]
    Api(ApiFailure),

    /// A body that should have been JSON could not be parsed
    #[error("{message}: {source}")]
    Decode {
        message: &'static str,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Operation attempted without the required setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller passed an argument the API can never accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClarifyError {
    pub(crate) fn decode(raw: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            message: DECODE_MESSAGE,
            raw: raw.into(),
            source,
        }
    }

    /// The API failure carried by this error, if it is one.
    pub fn as_api(&self) -> Option<&ApiFailure> {
        match self {
            Self::Api(failure) => Some(failure),
            _ => None,
        }
    }

    /// The offending body text of a decode failure.
    pub fn offending_data(&self) -> Option<&str> {
        match self {
            Self::Decode { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Body shape the API uses for error responses.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Value,
    #[serde(default)]
    message: Value,
    #[serde(default)]
    code: Value,
}

/// An unexpected status code together with the raw response body.
///
/// The body is decoded on a best-effort basis. When it is not the API's
/// error document the structured accessors return an empty string and the
/// raw text remains available through [`ApiFailure::body`].
#[derive(Debug, Clone)]
pub struct ApiFailure {
    status_code: u16,
    body: String,
    detail: Option<ErrorBody>,
}

impl ApiFailure {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let detail = serde_json::from_str(&body).ok();
        Self {
            status_code,
            body,
            detail,
        }
    }

    /// The HTTP status code of the response.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The `status` field of the error document.
    pub fn status(&self) -> String {
        self.field(|d| &d.status)
    }

    /// The `message` field of the error document.
    pub fn message(&self) -> String {
        self.field(|d| &d.message)
    }

    /// The `code` field of the error document. Normally matches
    /// [`ApiFailure::status_code`].
    pub fn code(&self) -> String {
        self.field(|d| &d.code)
    }

    /// True for `409 Conflict`, which the API returns when a versioned
    /// update was made against a stale copy.
    pub fn is_conflict(&self) -> bool {
        self.status_code == 409
    }

    fn field(&self, pick: impl Fn(&ErrorBody) -> &Value) -> String {
        match self.detail.as_ref().map(pick) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message();
        if message.is_empty() {
            write!(f, "API error ({})", self.status_code)
        } else {
            write!(f, "API error ({}): {}", self.status_code, message)
        }
    }
}

/// Result type for Clarify client operations.
pub type Result<T> = std::result::Result<T, ClarifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failure_exposes_error_document() {
        let failure = ApiFailure::new(
            404,
            r#"{"status":"error","message":"Bundle not found","code":404}"#,
        );

        assert_eq!(failure.status_code(), 404);
        assert_eq!(failure.status(), "error");
        assert_eq!(failure.message(), "Bundle not found");
        assert_eq!(failure.code(), "404");
        assert_eq!(failure.to_string(), "API error (404): Bundle not found");
    }

    #[test]
    fn test_api_failure_with_garbage_body() {
        let failure = ApiFailure::new(502, "<html>Bad Gateway</html>");

        assert_eq!(failure.body(), "<html>Bad Gateway</html>");
        assert_eq!(failure.status(), "");
        assert_eq!(failure.message(), "");
        assert_eq!(failure.code(), "");
        assert_eq!(failure.to_string(), "API error (502)");
    }

    #[test]
    fn test_api_failure_missing_fields() {
        let failure = ApiFailure::new(409, r#"{"message":"Version mismatch"}"#);

        assert!(failure.is_conflict());
        assert_eq!(failure.status(), "");
        assert_eq!(failure.message(), "Version mismatch");
    }

    #[test]
    fn test_decode_error_keeps_raw_text() {
        let source = serde_json::from_str::<Value>("{not json").unwrap_err();
        let err = ClarifyError::decode("{not json", source);

        assert_eq!(err.offending_data(), Some("{not json"));
        assert!(err.to_string().starts_with(DECODE_MESSAGE));
        assert!(err.as_api().is_none());
    }
}
