//! The link resolution engine.
//!
//! A [`Linker`] owns an ordered chain of [`Mapper`]s. For every dependency bump
//! in a changelog it asks each mapper in turn, stops at the first one that
//! finds a link, and writes that link onto the bump. Mapper order is priority.
//!
//! ```rust,no_run
//! use relnotes_core::{Changelog, Dictionary, DictionaryMapper, GithubMapper, LeadingVCheck, Linker, Mapper};
//! use std::path::Path;
//!
//! # async fn example() -> relnotes_core::Result<()> {
//! let mut changelog = Changelog::load(Path::new("changelog.yaml"))?;
//!
//! let mappers: Vec<Box<dyn Mapper>> = vec![
//!     Box::new(DictionaryMapper::new(Dictionary::sample())),
//!     Box::new(LeadingVCheck::new(GithubMapper::new())?),
//! ];
//! let report = Linker::new(mappers).link(&mut changelog).await?;
//! println!("linked {} of {}", report.linked, report.total());
//! # Ok(())
//! # }
//! ```

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, instrument};

use crate::mapper::{Mapper, Resolution};
use crate::{Changelog, Dependency, Result};

/// Upper bound for concurrent resolutions.
pub const MAX_CONCURRENCY: usize = 64;

/// Outcome counts of a linking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Dependencies for which a mapper found a link.
    pub linked: usize,
    /// Dependencies no mapper had a link for.
    pub unlinked: usize,
}

impl LinkReport {
    /// Total number of dependencies processed.
    pub const fn total(&self) -> usize {
        self.linked + self.unlinked
    }
}

/// Resolves release-note links for every dependency bump in a changelog.
pub struct Linker {
    mappers: Vec<Box<dyn Mapper>>,
    concurrency: usize,
}

impl Linker {
    /// Create a linker trying `mappers` in the given order, one dependency at a time.
    pub fn new(mappers: Vec<Box<dyn Mapper>>) -> Self {
        Self {
            mappers,
            concurrency: 1,
        }
    }

    /// Resolve up to `concurrency` dependencies at once (clamped to 1-64).
    ///
    /// Results are still written back in document order, and the first error
    /// in document order is the one reported.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Configured concurrency level.
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Names of the configured mappers, in priority order.
    pub fn mapper_names(&self) -> Vec<&'static str> {
        self.mappers.iter().map(|m| m.name()).collect()
    }

    /// Resolve a single dependency against the mapper chain.
    ///
    /// Returns `None` when no mapper has a link. Mapper errors are wrapped with
    /// the dependency name and mapper identity.
    pub async fn resolve(&self, dependency: &Dependency) -> Result<Option<String>> {
        for mapper in &self.mappers {
            let resolution = mapper
                .map(dependency)
                .await
                .map_err(|e| e.in_mapper(&dependency.name, mapper.name()))?;

            if let Resolution::Found(link) = resolution {
                debug!(dependency = %dependency.name, mapper = mapper.name(), %link, "Resolved link");
                return Ok(Some(link));
            }
        }

        debug!(dependency = %dependency.name, "No mapper found a link");
        Ok(None)
    }

    /// Resolve and write links for every dependency in `changelog`.
    ///
    /// Dependencies no mapper can link keep whatever link they already had.
    /// The first hard error aborts the run; in that case `changelog` is left
    /// unmodified.
    #[instrument(skip_all, fields(dependencies = changelog.dependencies.len(), concurrency = self.concurrency))]
    pub async fn link(&self, changelog: &mut Changelog) -> Result<LinkReport> {
        let links: Vec<Option<String>> = if self.concurrency <= 1 {
            let mut links = Vec::with_capacity(changelog.dependencies.len());
            for dependency in &changelog.dependencies {
                links.push(self.resolve(dependency).await?);
            }
            links
        } else {
            stream::iter(&changelog.dependencies)
                .map(|dependency| self.resolve(dependency))
                .buffered(self.concurrency)
                .try_collect()
                .await?
        };

        let mut report = LinkReport::default();
        for (dependency, link) in changelog.dependencies.iter_mut().zip(links) {
            if let Some(link) = link {
                dependency.link = link;
                report.linked += 1;
            } else {
                report.unlinked += 1;
            }
        }

        info!(
            linked = report.linked,
            unlinked = report.unlinked,
            "Linked dependency changelogs"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Linker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linker")
            .field("mappers", &self.mapper_names())
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::{Dictionary, DictionaryMapper, Error, GithubMapper, Version};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mapper that counts calls and finds nothing.
    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Mapper for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn map(&self, _dependency: &Dependency) -> Result<Resolution> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Resolution::NotFound)
        }
    }

    /// Mapper that finds `<name>@<to>` after a delay inversely related to position.
    struct Slow;

    #[async_trait]
    impl Mapper for Slow {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn map(&self, dependency: &Dependency) -> Result<Resolution> {
            let delay = if dependency.name == "first" { 50 } else { 1 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Resolution::Found(format!(
                "https://x.test/{}@{}",
                dependency.name,
                dependency.to.original()
            )))
        }
    }

    fn dep(name: &str, to: &str) -> Dependency {
        Dependency::new(name, None, Version::parse(to).unwrap())
    }

    fn changelog(deps: Vec<Dependency>) -> Changelog {
        Changelog {
            dependencies: deps,
            ..Changelog::default()
        }
    }

    fn dictionary_mapper() -> DictionaryMapper {
        DictionaryMapper::new(Dictionary::new([(
            "newrelic-infrastructure",
            "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-{{to}}",
        )]))
    }

    #[tokio::test]
    async fn test_first_found_wins_and_later_mappers_are_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let linker = Linker::new(vec![
            Box::new(dictionary_mapper()),
            Box::new(Counting(Arc::clone(&calls))),
        ]);

        let mut ch = changelog(vec![dep("newrelic-infrastructure", "1.2.3")]);
        let report = linker.link(&mut ch).await.unwrap();

        assert_eq!(
            ch.dependencies[0].link,
            "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-1.2.3"
        );
        assert_eq!(report, LinkReport { linked: 1, unlinked: 0 });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_mapper() {
        let linker = Linker::new(vec![
            Box::new(dictionary_mapper()),
            Box::new(GithubMapper::new()),
        ]);

        let mut ch = changelog(vec![dep("github.com/spf13/cobra", "v1.6.0")]);
        linker.link(&mut ch).await.unwrap();

        assert_eq!(
            ch.dependencies[0].link,
            "https://github.com/spf13/cobra/releases/tag/v1.6.0"
        );
    }

    #[tokio::test]
    async fn test_unresolvable_dependency_stays_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let linker = Linker::new(vec![
            Box::new(dictionary_mapper()),
            Box::new(GithubMapper::new()),
            Box::new(Counting(Arc::clone(&calls))),
        ]);

        let mut ch = changelog(vec![dep("left-pad", "1.0.0"), dep("github.com/a/b", "2.0.0")]);
        let report = linker.link(&mut ch).await.unwrap();

        assert!(ch.dependencies[0].link.is_empty());
        assert!(!ch.dependencies[1].link.is_empty());
        assert_eq!(report, LinkReport { linked: 1, unlinked: 1 });
        assert_eq!(report.total(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_link_kept_when_nothing_found() {
        let linker = Linker::new(vec![Box::new(GithubMapper::new())]);
        let mut existing = dep("left-pad", "1.0.0");
        existing.link = "https://left-pad.test/notes".to_string();

        let mut ch = changelog(vec![existing]);
        linker.link(&mut ch).await.unwrap();

        assert_eq!(ch.dependencies[0].link, "https://left-pad.test/notes");
    }

    #[tokio::test]
    async fn test_mapper_error_aborts_with_identity() {
        let linker = Linker::new(vec![Box::new(DictionaryMapper::new(Dictionary::new([(
            "broken",
            "https://x.test/{{.Bogus}}",
        )])))]);

        let mut ch = changelog(vec![dep("github.com/a/b", "1.0.0"), dep("broken", "1.0.0")]);
        let err = linker.link(&mut ch).await.unwrap_err();

        match &err {
            Error::Mapper {
                dependency,
                mapper,
                source,
            } => {
                assert_eq!(dependency, "broken");
                assert_eq!(*mapper, "dictionary");
                assert!(matches!(**source, Error::Template { .. }));
            },
            other => panic!("expected mapper error, got {other:?}"),
        }
        assert!(ch.dependencies.iter().all(|d| d.link.is_empty()));
    }

    #[tokio::test]
    async fn test_linking_is_idempotent() {
        let linker = Linker::new(vec![
            Box::new(dictionary_mapper()),
            Box::new(GithubMapper::new()),
        ]);

        let mut ch = changelog(vec![
            dep("newrelic-infrastructure", "1.2.3"),
            dep("github.com/spf13/cobra", "v1.6.0"),
            dep("left-pad", "1.0.0"),
        ]);
        linker.link(&mut ch).await.unwrap();
        let first = ch.clone();
        linker.link(&mut ch).await.unwrap();

        assert_eq!(ch, first);
    }

    #[tokio::test]
    async fn test_concurrent_linking_preserves_document_order() {
        let linker = Linker::new(vec![Box::new(Slow)]).with_concurrency(4);
        assert_eq!(linker.concurrency(), 4);

        let mut ch = changelog(vec![dep("first", "1.0.0"), dep("second", "2.0.0"), dep("third", "3.0.0")]);
        let report = linker.link(&mut ch).await.unwrap();

        let links: Vec<_> = ch.dependencies.iter().map(|d| d.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://x.test/first@1.0.0",
                "https://x.test/second@2.0.0",
                "https://x.test/third@3.0.0",
            ]
        );
        assert_eq!(report.linked, 3);
    }

    #[test]
    fn test_concurrency_is_clamped() {
        assert_eq!(Linker::new(Vec::new()).with_concurrency(0).concurrency(), 1);
        assert_eq!(
            Linker::new(Vec::new()).with_concurrency(1000).concurrency(),
            MAX_CONCURRENCY
        );
    }

    #[tokio::test]
    async fn test_empty_changelog() {
        let linker = Linker::new(vec![Box::new(GithubMapper::new())]);
        let mut ch = Changelog::default();
        assert_eq!(linker.link(&mut ch).await.unwrap(), LinkReport::default());
    }

    #[test]
    fn test_debug_lists_mappers() {
        let linker = Linker::new(vec![Box::new(dictionary_mapper()), Box::new(GithubMapper::new())]);
        assert_eq!(linker.mapper_names(), vec!["dictionary", "github"]);
        assert!(format!("{linker:?}").contains("github"));
    }
}
