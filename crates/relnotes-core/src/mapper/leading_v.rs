use async_trait::async_trait;
use tracing::debug;

use super::{Mapper, Resolution};
use crate::checker::{HttpChecker, LinkChecker, parse_link};
use crate::{Dependency, Result};

/// Confirms links from an inner mapper exist, correcting the version's leading `v`.
///
/// Release tags are spelled `v1.2.3` by some projects and `1.2.3` by others,
/// while dependency manifests rarely agree with the tag. When the inner
/// mapper's link fails its probe, the inner mapper is asked once more for the
/// same bump with the leading `v` of the new version toggled, and that link is
/// probed once. If neither exists the result is `NotFound`; probe failures are
/// never errors. Links that are not absolute http(s) URLs are errors.
#[derive(Debug, Clone)]
pub struct LeadingVCheck<M, C = HttpChecker> {
    inner: M,
    checker: C,
}

impl<M: Mapper> LeadingVCheck<M> {
    /// Wrap `inner`, probing with a default [`HttpChecker`].
    pub fn new(inner: M) -> Result<Self> {
        Ok(Self::with_checker(inner, HttpChecker::new()?))
    }
}

impl<M: Mapper, C: LinkChecker> LeadingVCheck<M, C> {
    /// Wrap `inner`, probing with `checker`.
    pub const fn with_checker(inner: M, checker: C) -> Self {
        Self { inner, checker }
    }

    async fn exists(&self, link: &str) -> Result<bool> {
        let url = parse_link(link)?;
        Ok(self.checker.check(&url).await)
    }
}

#[async_trait]
impl<M: Mapper, C: LinkChecker> Mapper for LeadingVCheck<M, C> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn map(&self, dependency: &Dependency) -> Result<Resolution> {
        let Resolution::Found(candidate) = self.inner.map(dependency).await? else {
            return Ok(Resolution::NotFound);
        };

        if self.exists(&candidate).await? {
            return Ok(Resolution::Found(candidate));
        }

        let mut toggled = dependency.clone();
        toggled.to = dependency.to.with_toggled_prefix();

        let Resolution::Found(retry) = self.inner.map(&toggled).await? else {
            debug!(dependency = %dependency.name, %candidate, "Link not found and no toggled variant");
            return Ok(Resolution::NotFound);
        };

        // Inner mappers that ignore the version produce the same link again.
        if retry == candidate {
            return Ok(Resolution::NotFound);
        }

        if self.exists(&retry).await? {
            debug!(dependency = %dependency.name, link = %retry, "Link found after toggling leading 'v'");
            return Ok(Resolution::Found(retry));
        }

        debug!(
            dependency = %dependency.name,
            %candidate,
            %retry,
            "Neither link variant exists"
        );
        Ok(Resolution::NotFound)
    }
}
