use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use changelet_core::EntryType;

use crate::error::FormatError;

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// The decoded contents of an entry file, before any PR resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDocument {
    pub entry_type: EntryType,
    /// Explicit PR number override from the front matter.
    pub pr: Option<u64>,
    pub description: String,
}

#[serde_as]
#[derive(Deserialize)]
struct FrontMatter {
    #[serde(rename = "type", default)]
    #[serde_as(as = "DisplayFromStr")]
    entry_type: EntryType,
    #[serde(default)]
    pr: Option<u64>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn strip_trailing_line_ending(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(FormatError::MissingOpeningDelimiter);
    }

    let after_opening = &trimmed[FRONT_MATTER_DELIMITER.len()..];
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FormatError::MissingClosingDelimiter);
    };

    let yaml_content = after_opening[..closing_pos].trim_end_matches('\r');
    if yaml_content.trim().is_empty() {
        return Err(FormatError::EmptyFrontMatter);
    }

    let after_closing = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];
    let body = strip_line_ending(after_closing);

    Ok((yaml_content, body))
}

/// Decodes an entry file.
///
/// Exactly one trailing newline is removed from the description; any further
/// trailing newlines are kept as part of it.
///
/// # Errors
///
/// Returns an error if the front matter is missing, malformed, or carries an
/// unknown entry type.
#[must_use = "parsing result should be handled"]
pub fn parse_entry(content: &str) -> Result<EntryDocument, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(FormatError::TooLarge {
            max_bytes: MAX_INPUT_SIZE,
        });
    }

    let (yaml_content, body) = extract_front_matter(content)?;
    let front_matter: FrontMatter = serde_yml::from_str(yaml_content)?;

    Ok(EntryDocument {
        entry_type: front_matter.entry_type,
        pr: front_matter.pr,
        description: strip_trailing_line_ending(body).to_string(),
    })
}
