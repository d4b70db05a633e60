//! Changelog document model.
//!
//! A changelog is a YAML document describing one release: free-form notes,
//! a list of categorized change entries, and the dependency bumps it ships.
//!
//! ```yaml
//! notes: |-
//!   Highlights of this release.
//! changes:
//!   - type: enhancement
//!     message: Support arm64 images
//! dependencies:
//!   - name: github.com/spf13/cobra
//!     from: v1.5.0
//!     to: v1.6.0
//!     changelog: https://github.com/spf13/cobra/releases/tag/v1.6.0
//! ```
//!
//! The `changelog` field of a dependency is the link written by the
//! [`Linker`](crate::Linker); it is omitted when empty.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BumpType, Result, Version};

/// A single release's changelog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Whether the release is on hold.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub held: bool,
    /// Free-form release notes, rendered before all sections.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Categorized change entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Entry>,
    /// Dependency bumps shipped in this release.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

/// A categorized change entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Category of the change.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Human-readable description.
    pub message: String,
    /// Where the entry came from.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

/// Category of a change entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Breaking change.
    Breaking,
    /// Security notice.
    Security,
    /// New functionality.
    Enhancement,
    /// Bug fix.
    Bugfix,
    /// Dependency change described in prose.
    Dependency,
    /// Anything else.
    #[serde(other)]
    Other,
}

/// A dependency version bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency name, e.g. `github.com/spf13/cobra` or `newrelic-infrastructure`.
    pub name: String,
    /// Version before the bump, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Version>,
    /// Version after the bump.
    pub to: Version,
    /// Link to the dependency's release notes for `to`. Empty when unresolved.
    #[serde(
        rename = "changelog",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub link: String,
    /// Where the bump came from.
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

/// Provenance of an entry or dependency bump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Pull request number or reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,
    /// Commit hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl Meta {
    /// Whether no provenance is recorded.
    pub const fn is_empty(&self) -> bool {
        self.pr.is_none() && self.commit.is_none()
    }
}

impl Dependency {
    /// Create a bump with no link and no provenance.
    pub fn new(name: impl Into<String>, from: Option<Version>, to: Version) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            link: String::new(),
            meta: Meta::default(),
        }
    }

    /// Size of this bump. Unknown previous versions count as `None`.
    pub fn bump(&self) -> BumpType {
        self.from
            .as_ref()
            .map_or(BumpType::None, |from| {
                BumpType::from_versions(from.semver(), self.to.semver())
            })
    }
}

impl Changelog {
    /// Load a changelog from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a changelog from YAML text. An empty document is an empty changelog.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize this changelog to YAML text.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write this changelog to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Entries of the given kind, in document order.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.changes.iter().filter(move |e| e.kind == kind)
    }

    /// Largest bump across all dependencies.
    pub fn dependency_bump(&self) -> BumpType {
        self.dependencies
            .iter()
            .fold(BumpType::None, |acc, dep| acc.with(dep.bump()))
    }

    /// Whether the changelog has nothing to release.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.changes.is_empty() && self.dependencies.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
notes: Highlights of this release.
changes:
  - type: breaking
    message: Drop support for Go 1.19
  - type: enhancement
    message: Support arm64 images
    meta:
      pr: '42'
  - type: chore
    message: Tidy up
dependencies:
  - name: github.com/spf13/cobra
    from: v1.5.0
    to: v1.6.0
  - name: newrelic-infrastructure
    from: 1.2.2
    to: 1.2.3
    changelog: https://example.com/old
";

    #[test]
    fn test_parse_sample() {
        let ch = Changelog::from_yaml(SAMPLE).unwrap();
        assert_eq!(ch.notes, "Highlights of this release.");
        assert_eq!(ch.changes.len(), 3);
        assert_eq!(ch.changes[1].meta.pr.as_deref(), Some("42"));
        assert_eq!(ch.changes[2].kind, EntryKind::Other);
        assert_eq!(ch.dependencies.len(), 2);
        assert_eq!(ch.dependencies[0].to.original(), "v1.6.0");
        assert!(ch.dependencies[0].link.is_empty());
        assert_eq!(ch.dependencies[1].link, "https://example.com/old");
    }

    #[test]
    fn test_yaml_output_keeps_version_literals_and_links() {
        let mut ch = Changelog::from_yaml(SAMPLE).unwrap();
        ch.dependencies[0].link = "https://github.com/spf13/cobra/releases/tag/v1.6.0".to_string();

        let out = ch.to_yaml().unwrap();
        assert!(out.contains("to: v1.6.0"));
        assert!(out.contains("changelog: https://github.com/spf13/cobra/releases/tag/v1.6.0"));

        let reparsed = Changelog::from_yaml(&out).unwrap();
        assert_eq!(reparsed.dependencies, ch.dependencies);
    }

    #[test]
    fn test_empty_link_is_omitted() {
        let dep = Dependency::new("x", None, Version::parse("1.0.0").unwrap());
        let ch = Changelog {
            dependencies: vec![dep],
            ..Changelog::default()
        };
        let out = ch.to_yaml().unwrap();
        assert!(!out.contains("changelog"));
        assert!(!out.contains("from"));
    }

    #[test]
    fn test_empty_document() {
        let ch = Changelog::from_yaml("  \n").unwrap();
        assert!(ch.is_empty());
    }

    #[test]
    fn test_dependency_bump() {
        let ch = Changelog::from_yaml(SAMPLE).unwrap();
        assert_eq!(ch.dependencies[0].bump(), BumpType::Minor);
        assert_eq!(ch.dependencies[1].bump(), BumpType::Patch);
        assert_eq!(ch.dependency_bump(), BumpType::Minor);
    }

    #[test]
    fn test_entries_of() {
        let ch = Changelog::from_yaml(SAMPLE).unwrap();
        let breaking: Vec<_> = ch.entries_of(EntryKind::Breaking).collect();
        assert_eq!(breaking.len(), 1);
        assert_eq!(breaking[0].message, "Drop support for Go 1.19");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("changelog.yaml");
        let ch = Changelog::from_yaml(SAMPLE).unwrap();
        ch.save(&path).unwrap();
        assert_eq!(Changelog::load(&path).unwrap(), ch);
    }
}
