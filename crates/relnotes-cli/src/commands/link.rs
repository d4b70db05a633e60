//! Link-dependencies command implementation

use std::time::Duration;

use anyhow::{Context, Result};
use relnotes_core::{Changelog, Dictionary, LinkConfig, RouteShape};
use tracing::{debug, info};

use crate::cli::LinkArgs;

/// Resolve release-note links for every dependency in the changelog and
/// write the changelog back in place.
pub async fn execute(args: &LinkArgs) -> Result<()> {
    if args.sample {
        let sample = Dictionary::sample()
            .to_yaml()
            .context("Failed to serialize sample dictionary")?;
        print!("{sample}");
        return Ok(());
    }

    let mut changelog = Changelog::load(&args.changelog)
        .with_context(|| format!("Failed to load changelog {}", args.changelog.display()))?;

    let dictionary = match &args.dictionary {
        Some(path) => {
            let dictionary = Dictionary::load(path)
                .with_context(|| format!("Failed to load dictionary {}", path.display()))?;
            debug!("Loaded {} dictionary entries", dictionary.len());
            Some(dictionary)
        },
        None => None,
    };

    let linker = config_from(args)
        .build_linker(dictionary)
        .context("Failed to set up link mappers")?;

    let report = linker
        .link(&mut changelog)
        .await
        .context("Failed to link dependency changelogs")?;

    changelog
        .save(&args.changelog)
        .with_context(|| format!("Failed to write changelog {}", args.changelog.display()))?;

    info!(
        "Linked {} of {} dependencies in {}",
        report.linked,
        report.total(),
        args.changelog.display()
    );
    Ok(())
}

fn config_from(args: &LinkArgs) -> LinkConfig {
    LinkConfig {
        validate: !args.disable_github_validation,
        probe_timeout: Duration::from_secs(args.timeout),
        concurrency: usize::try_from(args.concurrency).unwrap_or(1),
        github_base_url: args.github_url.clone(),
        route_shape: if args.owner_repo_routes {
            RouteShape::OwnerRepo
        } else {
            RouteShape::Prefixed
        },
    }
}
