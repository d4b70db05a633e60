//! Error types for relnotes-core operations.
//!
//! Only configuration and programming defects are errors. A mapper that has no
//! answer for a dependency returns [`Resolution::NotFound`], and a failed
//! reachability probe is downgraded to the same outcome, so neither ever shows
//! up here.
//!
//! ## Error Categories
//!
//! - **Template errors**: malformed dictionary templates or unknown placeholders
//! - **Configuration errors**: unreadable or malformed dictionary files
//! - **URL errors**: a mapper produced something that is not an absolute URL
//! - **Mapper errors**: any of the above, tagged with the dependency and mapper
//!   that raised it
//! - **I/O and serialization errors**: loading or saving changelog documents
//!
//! [`Resolution::NotFound`]: crate::Resolution::NotFound

use thiserror::Error;

/// The main error type for relnotes-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed while reading or writing a document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client used for link validation could not be built.
    ///
    /// Failures of individual probes never surface as this variant; they are
    /// treated as "link not available".
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Dictionary configuration is unreadable or malformed.
    ///
    /// Raised at startup, before any dependency is resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A URL template could not be rendered.
    ///
    /// ## Common Causes
    ///
    /// - Unknown placeholder such as `{{.To.Build}}`
    /// - Unterminated `{{` in the template
    /// - Template references `from` on a bump that has no previous version
    #[error("Template error in '{template}': {reason}")]
    Template {
        /// Template source as written in the dictionary.
        template: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A candidate link is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A version literal could not be parsed.
    #[error("Invalid version: {0}")]
    Version(String),

    /// Serialization or deserialization of a document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A mapper failed with a hard error while resolving a dependency.
    ///
    /// Aborts the whole linking run.
    #[error("Linking '{dependency}' with the {mapper} mapper failed: {source}")]
    Mapper {
        /// Name of the dependency being resolved.
        dependency: String,
        /// Name of the mapper that raised the error.
        mapper: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Wrap this error with the identity of the dependency and mapper that raised it.
    #[must_use]
    pub fn in_mapper(self, dependency: impl Into<String>, mapper: &'static str) -> Self {
        Self::Mapper {
            dependency: dependency.into(),
            mapper,
            source: Box::new(self),
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Mapper errors report the category of the error they wrap.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::Template { .. } => "template",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Version(_) => "version",
            Self::Serialization(_) => "serialization",
            Self::Mapper { source, .. } => source.category(),
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
