//! Link resolution strategies.
//!
//! A [`Mapper`] looks at a dependency bump and either produces a link to its
//! release notes or reports that it has nothing to offer. The two outcomes are
//! kept apart from failures: [`Resolution::NotFound`] is an expected, common
//! answer, while `Err` is reserved for configuration or programming defects
//! such as malformed templates.
//!
//! Mappers available:
//!
//! - [`DictionaryMapper`]: operator-supplied templates, trusted as-is
//! - [`GithubMapper`]: derives GitHub release-tag URLs from route-shaped names
//! - [`LeadingVCheck`]: wraps another mapper and confirms the link exists,
//!   retrying once with the version's leading `v` toggled

use async_trait::async_trait;

use crate::{Dependency, Result};

mod dictionary;
mod github;
mod leading_v;

pub use dictionary::DictionaryMapper;
pub use github::{GITHUB_BASE_URL, GithubMapper, RouteShape};
pub use leading_v::LeadingVCheck;

/// Outcome of asking a mapper for a dependency's link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The mapper produced a link.
    Found(String),
    /// The mapper has no link for this dependency.
    NotFound,
}

impl Resolution {
    /// Whether a link was produced.
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The link, if one was produced.
    pub fn into_link(self) -> Option<String> {
        match self {
            Self::Found(link) => Some(link),
            Self::NotFound => None,
        }
    }
}

/// A strategy for resolving the release-notes link of a dependency bump.
#[async_trait]
pub trait Mapper: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Resolve a link for `dependency`.
    async fn map(&self, dependency: &Dependency) -> Result<Resolution>;
}

#[async_trait]
impl<M: Mapper + ?Sized> Mapper for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn map(&self, dependency: &Dependency) -> Result<Resolution> {
        (**self).map(dependency).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_helpers() {
        let found = Resolution::Found("https://x.test".to_string());
        assert!(found.is_found());
        assert_eq!(found.into_link().as_deref(), Some("https://x.test"));

        assert!(!Resolution::NotFound.is_found());
        assert_eq!(Resolution::NotFound.into_link(), None);
    }
}
