//! Insight operations.

use crate::client::{require_href, ClarifyClient};
use crate::error::{ClarifyError, Result};
use crate::transport::{Fields, Method};
use crate::types::Resource;
use tracing::info;

/// Relation prefix of individual insights in an insights resource.
pub const INSIGHT_PREFIX: &str = "insight:";

impl ClarifyClient {
    /// Get a bundle's insights resource, which links to each available
    /// insight through an `insight:<name>` relation.
    pub fn get_insights(&self, href: &str) -> Result<Resource> {
        require_href(href)?;
        self.fetch(Method::Get, href, Fields::new())
    }

    /// Get one insight.
    pub fn get_insight(&self, href: &str) -> Result<Resource> {
        require_href(href)?;
        self.fetch(Method::Get, href, Fields::new())
    }

    /// Ask the server to compute `insight` for a bundle. `href` is the
    /// bundle's `clarify:insights` link. The server usually answers
    /// `202 Accepted` with a pending insight.
    pub fn request_insight(&self, href: &str, insight: &str) -> Result<Resource> {
        require_href(href)?;
        if insight.is_empty() {
            return Err(ClarifyError::InvalidArgument(
                "insight name cannot be empty".into(),
            ));
        }

        let fields = vec![("insight".to_string(), insight.to_string())];
        let result = self.fetch(Method::Post, href, fields)?;
        info!(href = %href, insight = %insight, "Insight requested");
        Ok(result)
    }
}
