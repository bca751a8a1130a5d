/// Export error types
use clarify_client::{ApiFailure, ClarifyError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClarifyError),

    #[error("Bundle {href} has no {relation} resource")]
    MissingRelation { href: String, relation: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// The API failure behind this error, if the server rejected a request.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            ExportError::Client(e) => e.as_api(),
            _ => None,
        }
    }
}
