//! Markdown rendering of a changelog.

use chrono::NaiveDate;

use crate::{Changelog, Dependency, EntryKind, Version};

/// Release metadata shown in the rendered header.
#[derive(Debug, Clone, Default)]
pub struct ReleaseHeader {
    /// Version being released.
    pub version: Option<Version>,
    /// Release date.
    pub date: Option<NaiveDate>,
}

const SECTIONS: [(EntryKind, &str); 4] = [
    (EntryKind::Breaking, "### ⚠️️ Breaking changes ⚠️"),
    (EntryKind::Security, "### 🛡️ Security notices"),
    (EntryKind::Enhancement, "### 🚀 Enhancements"),
    (EntryKind::Bugfix, "### 🐞 Bug fixes"),
];

const DEPENDENCIES_HEADING: &str = "### ⛓️ Dependencies";

/// Render `changelog` as a Markdown release section.
///
/// Sections without entries are omitted. Entries of kind `other` are not
/// rendered. Dependency bumps that carry a link get a trailing changelog link.
pub fn render_markdown(changelog: &Changelog, header: &ReleaseHeader) -> String {
    let mut out = String::new();

    if let Some(version) = &header.version {
        out.push_str("## ");
        out.push_str(version.original());
        if let Some(date) = header.date {
            out.push_str(&format!(" - {}", date.format("%Y-%m-%d")));
        }
        out.push_str("\n\n");
    }

    if !changelog.notes.is_empty() {
        out.push_str(changelog.notes.trim_end());
        out.push_str("\n\n");
    }

    for (kind, heading) in SECTIONS {
        let items: Vec<String> = changelog.entries_of(kind).map(|e| e.message.clone()).collect();
        push_section(&mut out, heading, &items);
    }

    let dependency_items: Vec<String> = changelog
        .entries_of(EntryKind::Dependency)
        .map(|e| e.message.clone())
        .chain(changelog.dependencies.iter().map(dependency_line))
        .collect();
    push_section(&mut out, DEPENDENCIES_HEADING, &dependency_items);

    out
}

fn push_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
    out.push('\n');
}

fn dependency_line(dependency: &Dependency) -> String {
    let mut line = match &dependency.from {
        Some(from) => format!("Upgraded {} from {from} to {}", dependency.name, dependency.to),
        None => format!("Upgraded {} to {}", dependency.name, dependency.to),
    };
    if !dependency.link.is_empty() {
        line.push_str(&format!(" - [Changelog 🔗]({})", dependency.link));
    }
    line
}
