//! # relnotes-core
//!
//! Core functionality for relnotes: annotating the dependency bumps of a
//! release changelog with links to each dependency's own release notes.
//!
//! ## Architecture
//!
//! - **Changelog model**: [`Changelog`], [`Dependency`] and the [`Version`]
//!   type that remembers how a version was spelled
//! - **Mappers**: interchangeable link strategies behind the [`Mapper`] trait
//!   ([`DictionaryMapper`], [`GithubMapper`], [`LeadingVCheck`])
//! - **Linker**: the engine that runs the mapper chain over a changelog
//! - **Rendering**: Markdown output for release notes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relnotes_core::{Changelog, Dictionary, LinkConfig};
//! use std::path::Path;
//!
//! # async fn example() -> relnotes_core::Result<()> {
//! let path = Path::new("changelog.yaml");
//! let mut changelog = Changelog::load(path)?;
//! let dictionary = Dictionary::load(Path::new("dictionary.yml"))?;
//!
//! let linker = LinkConfig::default().build_linker(Some(dictionary))?;
//! linker.link(&mut changelog).await?;
//!
//! changelog.save(path)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! "No link" is not an error: mappers return [`Resolution::NotFound`] and
//! unreachable links are dropped. Errors are reserved for broken configuration
//! (malformed dictionary files or templates) and malformed URLs, and they abort
//! the run with the offending dependency identified.

pub mod bump;
pub mod changelog;
pub mod checker;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod linker;
pub mod mapper;
pub mod render;
pub mod template;
pub mod version;

pub use bump::BumpType;
pub use changelog::{Changelog, Dependency, Entry, EntryKind, Meta};
pub use checker::{HttpChecker, LinkChecker};
pub use config::LinkConfig;
pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use linker::{LinkReport, Linker};
pub use mapper::{DictionaryMapper, GithubMapper, LeadingVCheck, Mapper, Resolution, RouteShape};
pub use render::{ReleaseHeader, render_markdown};
pub use version::Version;
