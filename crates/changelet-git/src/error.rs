use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to resolve reference '{refspec}'")]
    RefNotFound { refspec: String },

    #[error("no staged changes to commit")]
    NothingStaged,

    #[error("HEAD is detached, not on a branch")]
    DetachedHead,

    #[error("branch '{name}' already exists")]
    BranchExists { name: String },

    #[error("diff delta has no file path")]
    MissingDeltaPath,

    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited unsuccessfully{}", format_stderr(.stderr))]
    CommandFailed { command: String, stderr: String },
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
