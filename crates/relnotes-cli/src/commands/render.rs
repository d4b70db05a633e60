//! Render command implementation

use anyhow::{Context, Result};
use relnotes_core::{Changelog, ReleaseHeader, render_markdown};

use crate::cli::RenderArgs;

/// Render the changelog as Markdown to stdout or to `--output`.
pub fn execute(args: &RenderArgs) -> Result<()> {
    let changelog = Changelog::load(&args.changelog)
        .with_context(|| format!("Failed to load changelog {}", args.changelog.display()))?;

    let header = ReleaseHeader {
        version: args.version.clone(),
        date: args.date,
    };
    let markdown = render_markdown(&changelog, &header);

    match &args.output {
        Some(path) => std::fs::write(path, markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{markdown}"),
    }
    Ok(())
}
