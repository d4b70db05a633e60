//! Bump classification: how far a version moved between two releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Size of a version bump, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// No bump at all.
    #[default]
    None,
    /// Patch component increased.
    Patch,
    /// Minor component increased.
    Minor,
    /// Major component increased.
    Major,
}

impl BumpType {
    /// Compose two bumps, keeping the larger one.
    #[must_use]
    pub fn with(self, other: Self) -> Self {
        self.max(other)
    }

    /// Limit this bump to at most `other`.
    ///
    /// `Major.cap(Minor)` is `Minor`; `Patch.cap(Minor)` is `Patch`.
    #[must_use]
    pub fn cap(self, other: Self) -> Self {
        self.min(other)
    }

    /// Deduce the bump that took `previous` to `current`.
    pub fn from_versions(previous: &semver::Version, current: &semver::Version) -> Self {
        if current.major > previous.major {
            Self::Major
        } else if current.minor > previous.minor {
            Self::Minor
        } else if current.patch > previous.patch {
            Self::Patch
        } else {
            Self::None
        }
    }

    /// Apply this bump to `version`, resetting lower components.
    ///
    /// Pre-release and build metadata are dropped on any real bump.
    #[must_use]
    pub fn apply(self, version: &semver::Version) -> semver::Version {
        match self {
            Self::None => version.clone(),
            Self::Patch if !version.pre.is_empty() => {
                semver::Version::new(version.major, version.minor, version.patch)
            },
            Self::Patch => semver::Version::new(version.major, version.minor, version.patch + 1),
            Self::Minor => semver::Version::new(version.major, version.minor + 1, 0),
            Self::Major => semver::Version::new(version.major + 1, 0, 0),
        }
    }

    /// Lowercase name of this bump.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BumpType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(Error::Config(format!(
                "bump name '{s}' is not one of \"none\", \"patch\", \"minor\", or \"major\""
            ))),
        }
    }
}
