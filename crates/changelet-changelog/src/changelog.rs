use std::io::ErrorKind;
use std::path::Path;

use crate::error::ChangelogError;
use crate::format::ReleaseSection;

pub const CHANGELOG_FILENAME: &str = "CHANGELOG.md";

/// In-memory view of a project's `CHANGELOG.md`. New releases go on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    content: String,
}

impl Changelog {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Loads the changelog at `path`. A missing file yields an empty
    /// changelog.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file exists but cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self { content }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn prepend(&mut self, section: &ReleaseSection) {
        let mut content = String::with_capacity(section.as_str().len() + self.content.len());
        content.push_str(section.as_str());
        content.push_str(&self.content);
        self.content = content;
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, puts `section` in front of the existing content and
    /// writes it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn prepend_to_file(path: &Path, section: &ReleaseSection) -> Result<(), ChangelogError> {
        let mut changelog = Self::from_file(path)?;
        changelog.prepend(section);
        changelog.write_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use changelet_core::{Entry, EntryType};
    use semver::Version;
    use tempfile::TempDir;

    use super::*;

    fn section() -> ReleaseSection {
        let entries = vec![Entry::new(EntryType::Patch, "fix it", "a.md")];
        ReleaseSection::new(
            Version::new(0, 1, 4),
            NaiveDate::from_ymd_opt(2025, 7, 10).expect("valid date"),
            None,
            &entries,
        )
    }

    #[test]
    fn prepend_places_section_first() {
        let mut changelog = Changelog::new("## 0.1.3 - 2025-01-01\n");
        changelog.prepend(&section());

        assert_eq!(
            changelog.content(),
            "## 0.1.4 - 2025-07-10\n\nPatch:\n* fix it\n\n## 0.1.3 - 2025-01-01\n"
        );
    }

    #[test]
    fn prepend_to_existing_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(CHANGELOG_FILENAME);
        std::fs::write(&path, "fin").expect("write changelog");

        Changelog::prepend_to_file(&path, &section()).expect("should prepend");

        let content = std::fs::read_to_string(&path).expect("read changelog");
        assert!(content.starts_with("## 0.1.4 - 2025-07-10\n"));
        assert!(content.ends_with("\n\nfin"));
    }

    #[test]
    fn missing_file_is_created() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(CHANGELOG_FILENAME);

        Changelog::prepend_to_file(&path, &section()).expect("should prepend");

        let content = std::fs::read_to_string(&path).expect("read changelog");
        assert_eq!(content, section().as_str());
    }

    #[test]
    fn unreadable_path_is_error() {
        let dir = TempDir::new().expect("create temp dir");

        let err = Changelog::from_file(dir.path()).expect_err("directory is not a file");
        assert!(matches!(err, ChangelogError::Read { .. }));
    }
}
