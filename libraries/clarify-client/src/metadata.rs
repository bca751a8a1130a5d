//! Metadata operations.

use crate::client::{push_field, require_href, ClarifyClient};
use crate::error::Result;
use crate::transport::{Fields, Method};
use crate::types::Resource;
use serde_json::Value;

impl ClarifyClient {
    /// Get a bundle's metadata.
    pub fn get_metadata(&self, href: &str) -> Result<Resource> {
        require_href(href)?;
        self.fetch(Method::Get, href, Fields::new())
    }

    /// Replace a bundle's metadata with `data`.
    ///
    /// When `version` is set it must match the server's copy or the call
    /// fails with `409 Conflict`.
    pub fn update_metadata(&self, href: &str, data: &Value, version: Option<i64>) -> Result<Resource> {
        require_href(href)?;

        let mut fields = Fields::new();
        push_field(&mut fields, "version", version);
        fields.push(("data".to_string(), data.to_string()));

        self.fetch(Method::Put, href, fields)
    }

    /// Delete a bundle's metadata.
    pub fn delete_metadata(&self, href: &str) -> Result<()> {
        require_href(href)?;
        self.remove(href, Fields::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_answering;
    use crate::transport::{ApiRequest, MockTransport, RawResponse};
    use mockall::predicate::eq;
    use serde_json::json;

    #[test]
    fn test_update_metadata_serializes_data() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .with(eq(ApiRequest::new(
                Method::Put,
                "/v1/bundles/bd9f/metadata",
                vec![
                    ("version".to_string(), "2".to_string()),
                    ("data".to_string(), r#"{"speaker":"ann"}"#.to_string()),
                ],
            )))
            .times(1)
            .returning(|_| {
                Ok(RawResponse {
                    status: 202,
                    body: r#"{"data":{"speaker":"ann"},"version":3}"#.to_string(),
                })
            });
        let client = ClarifyClient::with_transport(transport);

        let metadata = client
            .update_metadata("/v1/bundles/bd9f/metadata", &json!({"speaker": "ann"}), Some(2))
            .unwrap();
        assert_eq!(metadata["version"], 3);
    }

    #[test]
    fn test_update_metadata_conflict() {
        let client = client_answering(409, r#"{"status":"error","message":"version mismatch","code":409}"#);
        let err = client
            .update_metadata("/v1/bundles/bd9f/metadata", &json!({}), Some(1))
            .unwrap_err();
        assert!(err.as_api().unwrap().is_conflict());
    }

    #[test]
    fn test_delete_metadata() {
        assert!(client_answering(204, "")
            .delete_metadata("/v1/bundles/bd9f/metadata")
            .is_ok());
        assert!(client_answering(200, "{}")
            .delete_metadata("/v1/bundles/bd9f/metadata")
            .is_err());
    }
}
