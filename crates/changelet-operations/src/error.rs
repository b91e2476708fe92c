use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] changelet_core::ChangeletError),

    #[error(transparent)]
    Git(#[from] changelet_git::GitError),

    #[error(transparent)]
    Project(#[from] changelet_project::ProjectError),

    #[error(transparent)]
    Changelog(#[from] changelet_changelog::ChangelogError),

    #[error(transparent)]
    Version(#[from] changelet_version::VersionError),

    #[error("failed to encode changelog entry")]
    EntryEncode(#[from] changelet_parse::FormatError),

    #[error("failed to read changelog entry '{path}'")]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changelog entry '{path}'")]
    EntryParse {
        path: PathBuf,
        #[source]
        source: changelet_parse::FormatError,
    },

    #[error("failed to write changelog entry '{path}'")]
    EntryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove changelog entry '{path}'")]
    EntryRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list changelog entries in '{path}'")]
    EntryList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("unknown provider class '{class}' (available: {available})")]
    UnknownProvider { class: String, available: String },

    #[error("invalid options for provider '{class}'")]
    InvalidProviderOptions {
        class: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse pull request list from gh")]
    MalformedPrList(#[source] serde_json::Error),

    #[error("pull request #{number} has no url and no repo is configured")]
    PrWithoutUrl { number: u64 },

    #[error("releases must be made from '{expected}', currently on '{current}'")]
    NotOnBaseBranch { expected: String, current: String },

    #[error("working tree has uncommitted changes; commit or stash them first")]
    DirtyWorkingTree,

    #[error("git remote '{0}' is not configured")]
    MissingRemote(String),

    #[error("bump failed at step '{step}'{}", format_completed(.completed))]
    StepFailed {
        step: &'static str,
        completed: Vec<&'static str>,
        #[source]
        source: Box<OperationError>,
    },
}

fn format_completed(completed: &[&'static str]) -> String {
    if completed.is_empty() {
        String::from(", no changes were made")
    } else {
        format!(", already completed: {}", completed.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;
