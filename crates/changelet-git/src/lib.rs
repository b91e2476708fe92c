//! Git access for changelet: local repository queries and commits through
//! `git2`, and the `git`/`gh` subprocesses behind [`CommandRunner`].

mod command;
mod error;
mod repository;
mod types;

pub use command::{CommandRunner, GitCli, ProcessRunner, render_command};
pub use error::GitError;
pub use repository::Repository;
pub use types::{CommandOutput, CommitInfo, FileChange, FileStatus};

pub type Result<T> = std::result::Result<T, GitError>;
