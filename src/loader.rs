//! Config document loading
//!
//! The rule table and catalog are plain JSON documents. They come either
//! from a config service (`GET {base}/configs/{key}`, responses wrapped in
//! a `{ "key": ..., "payload": ... }` envelope) or from local files. A
//! failed remote fetch degrades to the local copies with a warning rather
//! than aborting.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::rules::RuleTable;

pub const RULES_KEY: &str = "rules";
pub const COMPONENTS_KEY: &str = "components";

pub const RULES_FILE: &str = "rules.json";
pub const COMPONENTS_FILE: &str = "components.json";

/// Where the documents actually came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    Local(PathBuf),
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Remote(base) => write!(f, "remote ({base})"),
            DataSource::Local(dir) => write!(f, "local ({})", dir.display()),
        }
    }
}

/// The two loaded documents plus their provenance.
#[derive(Debug, Clone)]
pub struct Documents {
    pub rules: RuleTable,
    pub catalog: Catalog,
    pub source: DataSource,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(10)))
        .build()
        .new_agent()
}

/// Strip the config-service envelope if present; bare documents pass
/// through unchanged.
fn unwrap_payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("payload") => map
            .remove("payload")
            .unwrap_or(Value::Object(Default::default())),
        other => other,
    }
}

fn fetch_config<T: DeserializeOwned>(agent: &ureq::Agent, base: &str, key: &str) -> Result<T> {
    let url = format!("{}/configs/{}", base.trim_end_matches('/'), key);
    debug!(%url, "fetching config document");
    let response = agent
        .get(&url)
        .call()
        .with_context(|| format!("GET {url}"))?;
    let status = response.status().as_u16();
    if status >= 400 {
        bail!("GET {url} returned status {status}");
    }
    let value: Value = response
        .into_body()
        .read_json()
        .with_context(|| format!("parsing response from {url}"))?;
    serde_json::from_value(unwrap_payload(value))
        .with_context(|| format!("decoding '{key}' document from {url}"))
}

fn load_local<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding {}", path.display()))
}

fn load_remote(base: &str) -> Result<(RuleTable, Catalog)> {
    let agent = make_agent();
    let rules = fetch_config(&agent, base, RULES_KEY)?;
    let catalog = fetch_config(&agent, base, COMPONENTS_KEY)?;
    Ok((rules, catalog))
}

fn load_local_dir(data_dir: &Path) -> Result<(RuleTable, Catalog)> {
    let rules = load_local(&data_dir.join(RULES_FILE))?;
    let catalog = load_local(&data_dir.join(COMPONENTS_FILE))?;
    Ok((rules, catalog))
}

/// Load rules and catalog, preferring the config service when a base URL
/// is given and falling back to `data_dir` on any remote failure.
pub fn load_documents(api_base: Option<&str>, data_dir: &Path) -> Result<Documents> {
    if let Some(base) = api_base {
        match load_remote(base) {
            Ok((rules, catalog)) => {
                return Ok(Documents {
                    rules,
                    catalog,
                    source: DataSource::Remote(base.to_string()),
                })
            }
            Err(err) => {
                warn!(error = %err, "remote config fetch failed; using local documents");
            }
        }
    }
    let (rules, catalog) = load_local_dir(data_dir)?;
    Ok(Documents {
        rules,
        catalog,
        source: DataSource::Local(data_dir.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_envelope_is_unwrapped() {
        let wrapped = json!({"key": "rules", "payload": {"budgets": []}});
        assert_eq!(unwrap_payload(wrapped), json!({"budgets": []}));

        let bare = json!({"budgets": []});
        assert_eq!(unwrap_payload(bare.clone()), bare);
    }

    #[test]
    fn local_documents_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RULES_FILE),
            r#"{"budgets": [{"id": "mid", "min": 8000, "max": 12000}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(COMPONENTS_FILE),
            r#"{"cpus": [{"id": "c", "priceRange": {"min": 1, "max": 2}}]}"#,
        )
        .unwrap();

        let docs = load_documents(None, dir.path()).unwrap();
        assert_eq!(docs.rules.budgets.len(), 1);
        assert_eq!(docs.catalog.cpus.len(), 1);
        assert_eq!(docs.source, DataSource::Local(dir.path().to_path_buf()));
    }

    #[test]
    fn missing_local_files_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_documents(None, dir.path()).is_err());
    }
}
