use serde::Serialize;

use changelet_core::EntryType;

use crate::error::FormatError;
use crate::parse::FRONT_MATTER_DELIMITER;

#[derive(Serialize)]
struct FrontMatterOutput {
    #[serde(rename = "type")]
    entry_type: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pr: Option<u64>,
}

/// Encodes an entry into its canonical file form.
///
/// The description is written as-is with no trailing newline added, so a
/// description that already ends in a newline keeps it across a reload.
///
/// # Errors
///
/// Returns an error if the front matter cannot be serialized.
#[must_use = "serialization result should be handled"]
pub fn serialize_entry(
    entry_type: EntryType,
    pr: Option<u64>,
    description: &str,
) -> Result<String, FormatError> {
    let yaml = serde_yml::to_string(&FrontMatterOutput { entry_type, pr })?;

    let mut output = String::with_capacity(yaml.len() + description.len() + 8);
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(description);

    Ok(output)
}
