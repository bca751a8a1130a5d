//! Reading and rewriting the query string of a pagination href.

use url::form_urlencoded;

/// A relative href split into its path and ordered query parameters.
///
/// Parameters keep the order in which they first appear. A key that is
/// repeated keeps its first value only; the API never repeats a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefQuery {
    path: String,
    params: Vec<(String, String)>,
}

impl HrefQuery {
    /// Split `href` at its `?` and decode the query.
    pub fn parse(href: &str) -> Self {
        let without_fragment = href.split('#').next().unwrap_or_default();
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let mut params: Vec<(String, String)> = Vec::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if !params.iter().any(|(k, _)| *k == key) {
                params.push((key.into_owned(), value.into_owned()));
            }
        }

        Self {
            path: path.to_string(),
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of `key` in place, or append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Set `key` when `value` is present, drop it otherwise.
    pub fn set_or_remove(&mut self, key: &str, value: Option<String>) {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<(String, String)>) {
        (self.path, self.params)
    }

    /// Re-encode as an href.
    pub fn to_href(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_and_params() {
        let q = HrefQuery::parse("/v1/bundles?embed=tracks%2Cmetadata&limit=5&iterator=abc");

        assert_eq!(q.path(), "/v1/bundles");
        assert_eq!(q.get("embed"), Some("tracks,metadata"));
        assert_eq!(q.get("limit"), Some("5"));
        assert_eq!(q.get("iterator"), Some("abc"));
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn test_parse_without_query() {
        let q = HrefQuery::parse("/v1/bundles/bd9f");
        assert_eq!(q.path(), "/v1/bundles/bd9f");
        assert!(q.params().is_empty());
        assert_eq!(q.to_href(), "/v1/bundles/bd9f");
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let q = HrefQuery::parse("/v1/search?query=a&limit=2&query=b");
        assert_eq!(q.get("query"), Some("a"));
        assert_eq!(q.params().len(), 2);
    }

    #[test]
    fn test_set_preserves_position() {
        let mut q = HrefQuery::parse("/v1/bundles?limit=5&iterator=abc");
        q.set("limit", "10");
        q.set("embed", "items");

        let keys: Vec<&str> = q.params().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["limit", "iterator", "embed"]);
        assert_eq!(q.get("limit"), Some("10"));
    }

    #[test]
    fn test_set_or_remove() {
        let mut q = HrefQuery::parse("/v1/bundles?embed=items&limit=5");
        q.set_or_remove("embed", None);
        assert_eq!(q.get("embed"), None);
        assert_eq!(q.to_href(), "/v1/bundles?limit=5");
    }

    #[test]
    fn test_to_href_encodes() {
        let mut q = HrefQuery::parse("/v1/search");
        q.set("query", "hello world");
        q.set("embed", "items,tracks");
        assert_eq!(
            q.to_href(),
            "/v1/search?query=hello+world&embed=items%2Ctracks"
        );
    }
}
