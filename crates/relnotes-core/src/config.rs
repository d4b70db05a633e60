//! Linking configuration and mapper-chain assembly.
//!
//! [`LinkConfig`] gathers the knobs exposed on the command line and builds the
//! [`Linker`] from them:
//!
//! 1. a [`DictionaryMapper`] when a dictionary was supplied,
//! 2. a [`GithubMapper`], wrapped in [`LeadingVCheck`] unless validation is
//!    disabled.
//!
//! ```rust
//! use relnotes_core::{Dictionary, LinkConfig};
//!
//! let config = LinkConfig {
//!     validate: false,
//!     ..LinkConfig::default()
//! };
//! let linker = config.build_linker(Some(Dictionary::sample()))?;
//! assert_eq!(linker.mapper_names(), vec!["dictionary", "github"]);
//! # Ok::<(), relnotes_core::Error>(())
//! ```

use std::time::Duration;

use crate::checker::{DEFAULT_PROBE_TIMEOUT, HttpChecker};
use crate::mapper::{GITHUB_BASE_URL, RouteShape};
use crate::{Dictionary, DictionaryMapper, GithubMapper, LeadingVCheck, Linker, Mapper, Result};

/// Settings for a linking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Probe heuristically derived GitHub links before accepting them.
    pub validate: bool,
    /// Timeout for each probe request.
    pub probe_timeout: Duration,
    /// Maximum dependencies resolved at once.
    pub concurrency: usize,
    /// GitHub web root used to build release-tag links.
    pub github_base_url: String,
    /// Which dependency names count as GitHub routes.
    pub route_shape: RouteShape,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            validate: true,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: 1,
            github_base_url: GITHUB_BASE_URL.to_string(),
            route_shape: RouteShape::default(),
        }
    }
}

impl LinkConfig {
    /// Assemble the mapper chain and return a ready [`Linker`].
    ///
    /// Fails only if the HTTP client for validation cannot be created.
    pub fn build_linker(&self, dictionary: Option<Dictionary>) -> Result<Linker> {
        let mut mappers: Vec<Box<dyn Mapper>> = Vec::with_capacity(2);

        if let Some(dictionary) = dictionary {
            mappers.push(Box::new(DictionaryMapper::new(dictionary)));
        }

        let github = GithubMapper::new()
            .with_base_url(self.github_base_url.clone())
            .with_shape(self.route_shape);

        if self.validate {
            let checker = HttpChecker::with_timeout(self.probe_timeout)?;
            mappers.push(Box::new(LeadingVCheck::with_checker(github, checker)));
        } else {
            mappers.push(Box::new(github));
        }

        Ok(Linker::new(mappers).with_concurrency(self.concurrency))
    }
}
