//! The HTTP seam between resource operations and the network.

use crate::error::{ClarifyError, Result};
use crate::types::ClientConfig;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

/// Name reported in the `User-Agent` header.
pub const LIBRARY_NAME: &str = "clarify-client";

/// Version of the compiler that built this crate, e.g. `1.80.1`.
pub const RUSTC_VERSION: &str = env!("CLARIFY_RUSTC_VERSION");

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat, ordered string fields of a request.
pub type Fields = Vec<(String, String)>;

/// One API request. For GET the fields become the query string, for the
/// other verbs a form-encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the host, optionally with a query string
    pub path: String,
    pub fields: Fields,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, fields: Fields) -> Self {
        Self {
            method,
            path: path.into(),
            fields,
        }
    }
}

/// Status and undecoded body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Executes requests against the API.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse>;
}

/// `User-Agent` value: library name, library version, compiler version.
pub fn user_agent() -> String {
    format!(
        "{}/{}/rust-{}",
        LIBRARY_NAME,
        env!("CARGO_PKG_VERSION"),
        RUSTC_VERSION
    )
}

/// Transport over a blocking reqwest connection pool.
pub struct HttpTransport {
    http: Client,
    host: String,
}

impl HttpTransport {
    /// Build the connection pool. The host must be an http(s) URL.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.host.is_empty() {
            return Err(ClarifyError::Configuration("host cannot be empty".into()));
        }

        let host = config.host.trim_end_matches('/').to_string();
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(ClarifyError::Configuration(
                "host must start with http:// or https://".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| {
                ClarifyError::Configuration("API key contains invalid header characters".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(user_agent())
            .default_headers(headers)
            .build()?;

        Ok(Self { http, host })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.host, request.path);
        debug!(method = %request.method, url = %url, fields = request.fields.len(), "Sending request");

        let builder = match request.method {
            Method::Get => self.http.get(&url).query(&request.fields),
            Method::Post => self.http.post(&url).form(&request.fields),
            Method::Put => self.http.put(&url).form(&request.fields),
            Method::Delete if request.fields.is_empty() => self.http.delete(&url),
            Method::Delete => self.http.delete(&url).form(&request.fields),
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        debug!(method = %request.method, url = %url, status, bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_validation() {
        assert!(HttpTransport::new(&ClientConfig::new("key")).is_ok());
        assert!(
            HttpTransport::new(&ClientConfig::new("key").with_host("http://localhost:8080")).is_ok()
        );

        for host in ["", "api.clarify.io", "ftp://api.clarify.io"] {
            let result = HttpTransport::new(&ClientConfig::new("key").with_host(host));
            assert!(matches!(result, Err(ClarifyError::Configuration(_))));
        }
    }

    #[test]
    fn test_host_normalization() {
        let transport =
            HttpTransport::new(&ClientConfig::anonymous().with_host("https://example.com//"))
                .unwrap();
        assert_eq!(transport.host(), "https://example.com");
    }

    #[test]
    fn test_user_agent_shape() {
        let agent = user_agent();
        let parts: Vec<&str> = agent.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], LIBRARY_NAME);
        assert_eq!(parts[1], env!("CARGO_PKG_VERSION"));
        assert_eq!(parts[2], format!("rust-{}", RUSTC_VERSION));
    }

    #[test]
    fn test_user_agent_reports_building_compiler() {
        // The installed toolchain is the one that built the test binary
        let output = std::process::Command::new("rustc")
            .arg("--version")
            .output()
            .unwrap();
        let installed = String::from_utf8(output.stdout).unwrap();

        assert_eq!(installed.split_whitespace().nth(1), Some(RUSTC_VERSION));
        assert_ne!(RUSTC_VERSION, env!("CARGO_PKG_RUST_VERSION"));

        let numbers: Vec<&str> = RUSTC_VERSION
            .split(['.', '-'])
            .take(3)
            .collect();
        assert_eq!(numbers.len(), 3);
        assert!(numbers.iter().all(|n| n.parse::<u32>().is_ok()));
    }
}
