mod changelog;
mod error;
mod format;

pub use changelog::{CHANGELOG_FILENAME, Changelog};
pub use error::ChangelogError;
pub use format::{ReleaseSection, format_entries, format_version_header};

pub type Result<T> = std::result::Result<T, ChangelogError>;
