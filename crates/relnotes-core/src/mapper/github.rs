use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::{Mapper, Resolution};
use crate::{Dependency, Result};

/// Public GitHub web root.
pub const GITHUB_BASE_URL: &str = "https://github.com";

/// `[http(s)://]github.com/<org>/<repo>[.git][/...]`, e.g. Go module paths.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PREFIXED_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?(?:/.*)?$")
        .unwrap()
});

/// Bare `<org>/<repo>`, e.g. GitHub Actions or Renovate package names.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static OWNER_REPO_ROUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").unwrap());

/// Which dependency names are treated as GitHub routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteShape {
    /// Only names spelling out the host: `github.com/<org>/<repo>[/...]`.
    #[default]
    Prefixed,
    /// Also bare `<org>/<repo>` names.
    OwnerRepo,
}

impl RouteShape {
    /// Extract `(org, repo)` from a dependency name, if it has this shape.
    pub fn route<'a>(&self, name: &'a str) -> Option<(&'a str, &'a str)> {
        let captures = PREFIXED_ROUTE.captures(name).or_else(|| match self {
            Self::Prefixed => None,
            Self::OwnerRepo => OWNER_REPO_ROUTE.captures(name),
        })?;

        let org = captures.get(1)?.as_str();
        let repo = captures.get(2)?.as_str();
        if is_dot_segment(org) || is_dot_segment(repo) {
            return None;
        }
        Some((org, repo))
    }
}

fn is_dot_segment(segment: &str) -> bool {
    segment.chars().all(|c| c == '.')
}

/// Derives GitHub release-tag links from dependency names that are GitHub routes.
///
/// `github.com/golangci/golangci-lint` bumped to `v1.55.0` maps to
/// `https://github.com/golangci/golangci-lint/releases/tag/v1.55.0`. The
/// link is built without any network access; wrap the mapper in
/// [`LeadingVCheck`](super::LeadingVCheck) to confirm it exists.
///
/// Bare tool names such as `golangci-lint` are not routes and need a
/// dictionary entry, as in [`Dictionary::sample`](crate::Dictionary::sample).
#[derive(Debug, Clone)]
pub struct GithubMapper {
    base_url: String,
    shape: RouteShape,
}

impl Default for GithubMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubMapper {
    /// Mapper for public GitHub, accepting only host-prefixed names.
    pub fn new() -> Self {
        Self {
            base_url: GITHUB_BASE_URL.to_string(),
            shape: RouteShape::default(),
        }
    }

    /// Use a different web root, e.g. a GitHub Enterprise host or a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Change which names are recognized as routes.
    #[must_use]
    pub const fn with_shape(mut self, shape: RouteShape) -> Self {
        self.shape = shape;
        self
    }

    /// Release-tag URL for a dependency, if its name is a route.
    pub fn release_url(&self, dependency: &Dependency) -> Option<String> {
        let (org, repo) = self.shape.route(&dependency.name)?;
        Some(format!(
            "{}/{org}/{repo}/releases/tag/{}",
            self.base_url,
            dependency.to.original()
        ))
    }
}

#[async_trait]
impl Mapper for GithubMapper {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn map(&self, dependency: &Dependency) -> Result<Resolution> {
        Ok(self
            .release_url(dependency)
            .map_or(Resolution::NotFound, Resolution::Found))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Version;

    fn dep(name: &str, to: &str) -> Dependency {
        Dependency::new(name, None, Version::parse(to).unwrap())
    }

    #[tokio::test]
    async fn test_maps_go_module_path() {
        let res = GithubMapper::new()
            .map(&dep("github.com/golangci/golangci-lint", "v1.55.0"))
            .await
            .unwrap();
        assert_eq!(
            res,
            Resolution::Found(
                "https://github.com/golangci/golangci-lint/releases/tag/v1.55.0".to_string()
            )
        );
    }

    #[test]
    fn test_route_variants() {
        let shape = RouteShape::Prefixed;
        assert_eq!(shape.route("github.com/spf13/cobra"), Some(("spf13", "cobra")));
        assert_eq!(shape.route("github.com/go-logr/logr/v2"), Some(("go-logr", "logr")));
        assert_eq!(shape.route("https://github.com/org/repo.git"), Some(("org", "repo")));
        assert_eq!(shape.route("github.com/org/repo.github.io"), Some(("org", "repo.github.io")));
    }

    #[test]
    fn test_non_routes() {
        let shape = RouteShape::Prefixed;
        assert_eq!(shape.route("golangci-lint"), None);
        assert_eq!(shape.route("golangci/golangci-lint"), None);
        assert_eq!(shape.route("github.com/only-org"), None);
        assert_eq!(shape.route("gitlab.com/org/repo"), None);
        assert_eq!(shape.route("k8s.io/client-go"), None);
        assert_eq!(shape.route("github.com/../repo"), None);
    }

    #[test]
    fn test_owner_repo_shape() {
        let shape = RouteShape::OwnerRepo;
        assert_eq!(shape.route("actions/checkout"), Some(("actions", "checkout")));
        assert_eq!(shape.route("github.com/spf13/cobra"), Some(("spf13", "cobra")));
        assert_eq!(shape.route("a/b/c"), None);
        assert_eq!(shape.route("left-pad"), None);
    }

    #[tokio::test]
    async fn test_non_route_is_not_found() {
        let res = GithubMapper::new()
            .map(&dep("newrelic-infrastructure", "1.2.3"))
            .await
            .unwrap();
        assert_eq!(res, Resolution::NotFound);
    }

    #[test]
    fn test_custom_base_url() {
        let mapper = GithubMapper::new().with_base_url("http://127.0.0.1:9999/");
        assert_eq!(
            mapper.release_url(&dep("github.com/a/b", "2.0.0")).as_deref(),
            Some("http://127.0.0.1:9999/a/b/releases/tag/2.0.0")
        );
    }
}
