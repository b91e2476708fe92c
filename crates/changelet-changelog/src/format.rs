use chrono::NaiveDate;
use semver::Version;

use changelet_core::{Entry, EntryType};

/// Types listed in a release section, in presentation order. `none` entries
/// never appear.
const LISTED_TYPES: [EntryType; 3] = [EntryType::Major, EntryType::Minor, EntryType::Patch];

#[must_use]
pub fn format_version_header(version: &Version, date: NaiveDate, title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("## {version} - {date} - {title}"),
        None => format!("## {version} - {date}"),
    }
}

/// Renders one block per listed type, each introduced by a blank line and its
/// label. Entries keep their relative order within a block.
#[must_use]
pub fn format_entries(entries: &[Entry]) -> String {
    let mut output = String::new();

    for entry_type in LISTED_TYPES {
        let mut block = entries
            .iter()
            .filter(|e| e.entry_type == entry_type && !e.description.is_empty())
            .peekable();

        if block.peek().is_none() {
            continue;
        }

        output.push('\n');
        output.push_str(entry_type.label());
        output.push_str(":\n");
        for entry in block {
            output.push_str(&entry.markdown());
            output.push('\n');
        }
    }

    output
}

/// A rendered changelog section for one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    pub version: Version,
    pub date: NaiveDate,
    pub title: Option<String>,
    text: String,
}

impl ReleaseSection {
    #[must_use]
    pub fn new(
        version: Version,
        date: NaiveDate,
        title: Option<String>,
        entries: &[Entry],
    ) -> Self {
        let mut text = format_version_header(&version, date, title.as_deref());
        text.push('\n');
        text.push_str(&format_entries(entries));
        text.push('\n');

        Self {
            version,
            date,
            title,
            text,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for ReleaseSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
