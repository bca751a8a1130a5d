/// Account export: every bundle with its tracks, metadata and insights
use crate::error::{ExportError, Result};
use clarify_client::{for_each, hal, ClarifyClient, EmbedFlags, Resource, INSIGHT_PREFIX};
use serde_json::Value;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Alias of another transcript relation; exporting it would duplicate data.
const TRANSCRIPT_ALIAS: &str = "insight:transcript";

pub struct Exporter<'a> {
    client: &'a ClarifyClient,
    output: PathBuf,
}

/// Totals of an export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub bundles: usize,
    pub files: usize,
}

impl<'a> Exporter<'a> {
    pub fn new(client: &'a ClarifyClient, output: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output: output.into(),
        }
    }

    /// Export every bundle of the account.
    pub fn run(&self) -> Result<ExportSummary> {
        std::fs::create_dir_all(&self.output)?;

        let mut summary = ExportSummary::default();
        for_each(
            |href| {
                self.client
                    .get_bundle_list(href, None, EmbedFlags::none())
                    .map_err(ExportError::from)
            },
            |href| {
                summary.files += self.export_bundle(href)?;
                summary.bundles += 1;
                Ok(ControlFlow::Continue(()))
            },
            None,
        )?;

        info!(
            bundles = summary.bundles,
            files = summary.files,
            output = %self.output.display(),
            "Export complete"
        );
        Ok(summary)
    }

    /// Export one bundle. Returns the number of files written.
    pub fn export_bundle(&self, href: &str) -> Result<usize> {
        info!(href = %href, "Exporting bundle");

        let embed = EmbedFlags::none().tracks(true).metadata(true).insights(true);
        let bundle = self.client.get_bundle(href, embed)?;
        let base = base_name(&bundle);

        let null = Value::Null;
        let mut files = 0;
        for (relation, suffix) in [("clarify:tracks", "tracks"), ("clarify:metadata", "metadata")] {
            let data = hal::embedded(&bundle, relation).unwrap_or(&null);
            self.write_json(&base, suffix, data)?;
            files += 1;
        }

        let insights = hal::embedded(&bundle, "clarify:insights").ok_or_else(|| {
            ExportError::MissingRelation {
                href: href.to_string(),
                relation: "clarify:insights".to_string(),
            }
        })?;

        for relation in hal::link_relations(insights) {
            if !relation.starts_with(INSIGHT_PREFIX) || relation == TRANSCRIPT_ALIAS {
                continue;
            }
            if let Some(insight_href) = hal::link_href(insights, relation) {
                let insight = self.client.get_insight(insight_href)?;
                self.write_json(&base, &relation[INSIGHT_PREFIX.len()..], &insight)?;
                files += 1;
            }
        }

        Ok(files)
    }

    fn write_json(&self, base: &str, kind: &str, content: &Value) -> Result<PathBuf> {
        let path = self.output.join(format!("{}-{}.json", base, kind));
        std::fs::write(&path, serde_json::to_string_pretty(content)?)?;
        debug!(path = %path.display(), "Wrote file");
        Ok(path)
    }
}

/// File name stem for a bundle: its external id, else its name, else its
/// id, without any file extension.
pub fn base_name(bundle: &Resource) -> String {
    let name = ["external_id", "name", "id"]
        .iter()
        .filter_map(|key| bundle.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or("bundle");

    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarify_client::{ApiRequest, RawResponse, Transport};
    use serde_json::json;
    use std::collections::HashMap;

    /// Answers GETs from a fixed table of path -> body.
    struct TableTransport(HashMap<String, Value>);

    impl Transport for TableTransport {
        fn execute(&self, request: &ApiRequest) -> clarify_client::Result<RawResponse> {
            Ok(match self.0.get(&request.path) {
                Some(body) => RawResponse {
                    status: 200,
                    body: body.to_string(),
                },
                None => RawResponse {
                    status: 404,
                    body: r#"{"status":"error","message":"Not found","code":404}"#.to_string(),
                },
            })
        }
    }

    fn account() -> HashMap<String, Value> {
        let mut table = HashMap::new();
        table.insert(
            "/v1/bundles".to_string(),
            json!({ "_links": { "items": [{ "href": "/v1/bundles/b1" }] } }),
        );
        table.insert(
            "/v1/bundles/b1".to_string(),
            json!({
                "id": "b1",
                "name": "interview.wav",
                "_links": { "self": { "href": "/v1/bundles/b1" } },
                "_embedded": {
                    "clarify:tracks": { "tracks": [{ "track": 0 }] },
                    "clarify:metadata": { "data": { "speaker": "ann" } },
                    "clarify:insights": {
                        "_links": {
                            "self": { "href": "/v1/bundles/b1/insights" },
                            "insight:spoken_keywords": { "href": "/v1/bundles/b1/insights/k1" },
                            "insight:transcript": { "href": "/v1/bundles/b1/insights/t1" }
                        }
                    }
                }
            }),
        );
        table.insert(
            "/v1/bundles/b1/insights/k1".to_string(),
            json!({ "track_data": [{ "keywords": [{ "term": "hello" }] }] }),
        );
        table
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(&json!({ "external_id": "ext-1.mp3", "name": "n" })), "ext-1");
        assert_eq!(base_name(&json!({ "name": "interview.wav", "id": "b1" })), "interview");
        assert_eq!(base_name(&json!({ "name": "", "id": "b1" })), "b1");
        assert_eq!(base_name(&json!({})), "bundle");
    }

    #[test]
    fn test_export_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let client = ClarifyClient::with_transport(TableTransport(account()));

        let summary = Exporter::new(&client, dir.path()).run().unwrap();
        assert_eq!(summary, ExportSummary { bundles: 1, files: 3 });

        let metadata: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("interview-metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(metadata["data"]["speaker"], "ann");

        assert!(dir.path().join("interview-tracks.json").exists());
        assert!(dir.path().join("interview-spoken_keywords.json").exists());
        assert!(!dir.path().join("interview-transcript.json").exists());
    }

    #[test]
    fn test_export_propagates_api_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = account();
        table.remove("/v1/bundles/b1/insights/k1");
        let client = ClarifyClient::with_transport(TableTransport(table));

        let err = Exporter::new(&client, dir.path()).run().unwrap_err();
        match err {
            ExportError::Client(e) => assert_eq!(e.as_api().unwrap().status_code(), 404),
            other => panic!("Expected client error, got {:?}", other),
        }
    }
}
