//! # CLI Structure and Argument Parsing
//!
//! `relnotes` works on a changelog YAML document produced earlier in the
//! release pipeline:
//!
//! ```bash
//! # Add release-note links to every dependency bump, in place
//! relnotes link-dependencies --changelog changelog.yaml --dictionary dictionary.yml
//!
//! # Print a sample dictionary
//! relnotes link-dependencies --sample
//!
//! # Render the changelog as Markdown
//! relnotes render --changelog changelog.yaml --version v1.4.0 --date 2024-03-01
//! ```
//!
//! Every option can also be set through a `RELNOTES_*` environment variable.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use relnotes_core::Version;
use relnotes_core::mapper::GITHUB_BASE_URL;

/// Default location of the changelog document.
pub const DEFAULT_CHANGELOG: &str = "changelog.yaml";

/// Main CLI structure for the `relnotes` command
#[derive(Parser, Clone, Debug)]
#[command(name = "relnotes")]
#[command(version)]
#[command(about = "relnotes - Link dependency bumps to their release notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Add links to the release notes of each dependency bump in a changelog
    ///
    /// Links are taken from the dictionary file when the dependency has an
    /// entry there, or derived automatically when the dependency name is a
    /// full GitHub route such as `github.com/spf13/cobra`.
    #[command(name = "link-dependencies")]
    LinkDependencies(LinkArgs),

    /// Render a changelog as Markdown
    Render(RenderArgs),
}

#[derive(Args, Clone, Debug)]
pub struct LinkArgs {
    /// Path to the changelog YAML document, rewritten in place
    #[arg(long, env = "RELNOTES_CHANGELOG", default_value = DEFAULT_CHANGELOG)]
    pub changelog: PathBuf,

    /// Path to a dictionary file mapping dependency names to release-note URL templates
    ///
    /// A YAML file with a root `dictionary` map (or a TOML file with a
    /// `[dictionary]` table). Templates typically include `{{.To.Original}}`,
    /// replaced by the new version as written. Run with `--sample` to see one.
    #[arg(long, env = "RELNOTES_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Print a sample dictionary to stdout and exit
    #[arg(long, env = "RELNOTES_SAMPLE")]
    pub sample: bool,

    /// Skip checking that automatically derived GitHub links exist
    ///
    /// Validation sends a HEAD request to each derived link and, if it does not
    /// exist, retries once with the version's leading `v` added or removed.
    /// When neither exists the dependency gets no link. With validation
    /// disabled, links are written without any network request.
    #[arg(long, env = "RELNOTES_DISABLE_GITHUB_VALIDATION")]
    pub disable_github_validation: bool,

    /// Also treat bare `<org>/<repo>` names as GitHub routes
    #[arg(long, env = "RELNOTES_OWNER_REPO_ROUTES")]
    pub owner_repo_routes: bool,

    /// Timeout in seconds for each validation request
    #[arg(
        long,
        env = "RELNOTES_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub timeout: u64,

    /// Number of dependencies to resolve concurrently
    #[arg(
        long,
        env = "RELNOTES_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..=64)
    )]
    pub concurrency: u64,

    /// GitHub web root used to build release links (e.g. a GitHub Enterprise host)
    #[arg(long, env = "RELNOTES_GITHUB_URL", default_value = GITHUB_BASE_URL)]
    pub github_url: String,
}

#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    /// Path to the changelog YAML document
    #[arg(long, env = "RELNOTES_CHANGELOG", default_value = DEFAULT_CHANGELOG)]
    pub changelog: PathBuf,

    /// Version shown in the release heading
    #[arg(long, env = "RELNOTES_VERSION", value_parser = parse_version)]
    pub version: Option<Version>,

    /// Release date shown in the heading (YYYY-MM-DD)
    #[arg(long, env = "RELNOTES_DATE", value_parser = parse_date, requires = "version")]
    pub date: Option<NaiveDate>,

    /// Write Markdown to this file instead of stdout
    #[arg(short, long, env = "RELNOTES_OUTPUT")]
    pub output: Option<PathBuf>,
}

fn parse_version(s: &str) -> Result<Version, String> {
    Version::parse(s).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}
