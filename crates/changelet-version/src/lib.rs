mod bump;
mod error;
mod file;

pub use bump::{bump_major, bump_minor, bump_patch, bump_version};
pub use error::VersionError;
pub use file::{VersionFile, module_name};

pub type Result<T> = std::result::Result<T, VersionError>;
