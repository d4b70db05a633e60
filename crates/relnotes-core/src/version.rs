//! Version values that remember how they were written.
//!
//! Release tags are written inconsistently across projects (`v1.2.3`, `1.2.3`,
//! `1.2`), and links to release notes have to reproduce the tag exactly. A
//! [`Version`] therefore keeps the literal text next to the parsed semantic
//! version and always serializes back to the literal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Leading character commonly prepended to release tags.
pub const VERSION_PREFIX: char = 'v';

/// A semantic version plus the literal text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    original: String,
    semver: semver::Version,
}

impl Version {
    /// Parse a version literal.
    ///
    /// A leading `v` is accepted, and missing minor or patch components are
    /// filled in with zero, so `v1.2` parses as `1.2.0` while still rendering as
    /// `v1.2`.
    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        let unprefixed = trimmed.strip_prefix(VERSION_PREFIX).unwrap_or(trimmed);

        let split = unprefixed.find(['-', '+']).unwrap_or(unprefixed.len());
        let (core, suffix) = unprefixed.split_at(split);
        let padded = match core.split('.').count() {
            1 => format!("{core}.0.0{suffix}"),
            2 => format!("{core}.0{suffix}"),
            _ => unprefixed.to_string(),
        };

        let semver = semver::Version::parse(&padded)
            .map_err(|e| Error::Version(format!("'{literal}': {e}")))?;

        Ok(Self {
            original: trimmed.to_string(),
            semver,
        })
    }

    /// The version exactly as it was written.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The parsed semantic version.
    pub const fn semver(&self) -> &semver::Version {
        &self.semver
    }

    /// Major component.
    pub const fn major(&self) -> u64 {
        self.semver.major
    }

    /// Minor component.
    pub const fn minor(&self) -> u64 {
        self.semver.minor
    }

    /// Patch component.
    pub const fn patch(&self) -> u64 {
        self.semver.patch
    }

    /// Whether the literal starts with the `v` prefix.
    pub fn has_prefix(&self) -> bool {
        self.original.starts_with(VERSION_PREFIX)
    }

    /// The same version with the leading `v` removed if present, or added if not.
    #[must_use]
    pub fn with_toggled_prefix(&self) -> Self {
        let original = self.original.strip_prefix(VERSION_PREFIX).map_or_else(
            || format!("{VERSION_PREFIX}{}", self.original),
            str::to_string,
        );

        Self {
            original,
            semver: self.semver.clone(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver
            .cmp(&other.semver)
            .then_with(|| self.original.cmp(&other.original))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a version string such as \"v1.2.3\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Version, E> {
                Version::parse(v).map_err(E::custom)
            }
        }

        // Plain scalars such as `1.10` must keep their text, never go through a float.
        deserializer.deserialize_str(VersionVisitor)
    }
}
