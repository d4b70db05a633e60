//! URL templates for dictionary entries.
//!
//! Templates are plain strings with `{{ … }}` placeholders that are replaced
//! with data from the dependency bump being linked:
//!
//! | Placeholder                      | Value                                  |
//! |----------------------------------|----------------------------------------|
//! | `{{.To.Original}}`, `{{to}}`     | new version exactly as written         |
//! | `{{.To.Major}}`, `.Minor`, `.Patch` | numeric components of the new version |
//! | `{{.From.Original}}`, `{{from}}` | previous version exactly as written    |
//! | `{{.Name}}`, `{{name}}`          | dependency name                        |
//!
//! Whitespace inside the braces is ignored.
//!
//! ```rust
//! use relnotes_core::{Dependency, Version, template};
//!
//! let dep = Dependency::new("newrelic-infrastructure", None, Version::parse("1.2.3")?);
//! let url = template::render(
//!     "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-{{to}}",
//!     &dep,
//! )?;
//! assert_eq!(
//!     url,
//!     "https://github.com/newrelic/nri-kubernetes/releases/tag/newrelic-infrastructure-1.2.3"
//! );
//! # Ok::<(), relnotes_core::Error>(())
//! ```

use crate::{Dependency, Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A value a placeholder can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ToOriginal,
    ToMajor,
    ToMinor,
    ToPatch,
    FromOriginal,
    Name,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            ".To.Original" | ".To" | "to" => Self::ToOriginal,
            ".To.Major" => Self::ToMajor,
            ".To.Minor" => Self::ToMinor,
            ".To.Patch" => Self::ToPatch,
            ".From.Original" | ".From" | "from" => Self::FromOriginal,
            ".Name" | "name" => Self::Name,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field),
}

/// A parsed URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, rejecting unknown placeholders and malformed braces.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                return Err(template_error(source, "unterminated '{{'"));
            };

            let key = after_open[..end].trim();
            if key.is_empty() {
                return Err(template_error(source, "empty placeholder"));
            }
            let field = Field::from_key(key)
                .ok_or_else(|| template_error(source, format!("unknown placeholder '{key}'")))?;
            segments.push(Segment::Placeholder(field));

            rest = &after_open[end + CLOSE.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template for a dependency bump.
    pub fn render(&self, dependency: &Dependency) -> Result<String> {
        let mut out = String::with_capacity(self.source.len() + 16);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(field) => match field {
                    Field::ToOriginal => out.push_str(dependency.to.original()),
                    Field::ToMajor => out.push_str(&dependency.to.major().to_string()),
                    Field::ToMinor => out.push_str(&dependency.to.minor().to_string()),
                    Field::ToPatch => out.push_str(&dependency.to.patch().to_string()),
                    Field::FromOriginal => {
                        let from = dependency.from.as_ref().ok_or_else(|| {
                            template_error(
                                &self.source,
                                "references the previous version but the bump has none",
                            )
                        })?;
                        out.push_str(from.original());
                    },
                    Field::Name => out.push_str(&dependency.name),
                },
            }
        }

        Ok(out)
    }
}

/// Parse and render `template` for `dependency` in one step.
pub fn render(template: &str, dependency: &Dependency) -> Result<String> {
    Template::parse(template)?.render(dependency)
}

fn template_error(template: &str, reason: impl Into<String>) -> Error {
    Error::Template {
        template: template.to_string(),
        reason: reason.into(),
    }
}
