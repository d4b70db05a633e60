//! Operator-supplied dictionary of dependency release-note URL templates.
//!
//! A dictionary maps dependency names (case-sensitive) to a URL
//! [template](crate::template). It is read once at startup and never mutated.
//!
//! ## File formats
//!
//! YAML, with a root `dictionary` map:
//!
//! ```yaml
//! dictionary:
//!   newrelic-infrastructure: "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-{{.To.Original}}"
//!   golangci-lint: "https://github.com/golangci/golangci-lint/releases/tag/{{.To.Original}}"
//! ```
//!
//! or TOML (picked when the file extension is `.toml`):
//!
//! ```toml
//! [dictionary]
//! golangci-lint = "https://github.com/golangci/golangci-lint/releases/tag/{{.To.Original}}"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Immutable name → URL template mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(rename = "dictionary")]
    changelogs: BTreeMap<String, String>,
}

impl Dictionary {
    /// Build a dictionary from name/template pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            changelogs: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a dictionary file.
    ///
    /// Files ending in `.toml` are parsed as TOML; anything else as YAML.
    /// Unreadable or malformed files are configuration errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("reading dictionary '{}': {e}", path.display()))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let dictionary = if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_yaml(&content)
        }
        .map_err(|e| Error::Config(format!("parsing dictionary '{}': {e}", path.display())))?;

        debug!(path = %path.display(), entries = dictionary.len(), "Loaded link dictionary");
        Ok(dictionary)
    }

    /// Parse a YAML dictionary document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Parse a TOML dictionary document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// A sample dictionary showing the expected shape.
    pub fn sample() -> Self {
        Self::new([
            (
                "newrelic-infrastructure",
                "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-{{.To.Original}}",
            ),
            (
                "golangci-lint",
                "https://github.com/golangci/golangci-lint/releases/tag/{{.To.Original}}",
            ),
        ])
    }

    /// Serialize as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Template registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.changelogs.get(name).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.changelogs.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.changelogs.is_empty()
    }
}
