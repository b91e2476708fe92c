use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangeletError {
    #[error("unknown entry type '{0}' (expected one of: none, patch, minor, major)")]
    UnknownEntryType(String),
}

pub type Result<T> = std::result::Result<T, ChangeletError>;
