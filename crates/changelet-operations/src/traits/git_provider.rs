use std::path::Path;

use changelet_git::{CommitInfo, FileChange};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Files changed relative to `base`, limited to `within`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or diff fails.
    fn changed_files(
        &self,
        project_root: &Path,
        base: &str,
        within: &Path,
    ) -> Result<Vec<FileChange>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or status check fails.
    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD is detached.
    fn current_branch(&self, project_root: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn remote_url(&self, project_root: &Path, remote: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the branch exists or cannot be checked out.
    fn create_branch(&self, project_root: &Path, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo>;

    /// # Errors
    ///
    /// Returns an error if pulling from the upstream fails.
    fn pull(&self, project_root: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the push is rejected or cannot run.
    fn push_upstream(&self, project_root: &Path, remote: &str, branch: &str) -> Result<()>;

    /// Lets the user pick hunks to stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the interactive session fails.
    fn stage_interactive(&self, project_root: &Path) -> Result<()>;
}

impl<G: GitProvider + ?Sized> GitProvider for &G {
    fn changed_files(
        &self,
        project_root: &Path,
        base: &str,
        within: &Path,
    ) -> Result<Vec<FileChange>> {
        (**self).changed_files(project_root, base, within)
    }

    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        (**self).is_working_tree_clean(project_root)
    }

    fn current_branch(&self, project_root: &Path) -> Result<String> {
        (**self).current_branch(project_root)
    }

    fn remote_url(&self, project_root: &Path, remote: &str) -> Result<Option<String>> {
        (**self).remote_url(project_root, remote)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        (**self).stage_files(project_root, paths)
    }

    fn create_branch(&self, project_root: &Path, name: &str) -> Result<()> {
        (**self).create_branch(project_root, name)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        (**self).commit(project_root, message)
    }

    fn pull(&self, project_root: &Path) -> Result<()> {
        (**self).pull(project_root)
    }

    fn push_upstream(&self, project_root: &Path, remote: &str, branch: &str) -> Result<()> {
        (**self).push_upstream(project_root, remote, branch)
    }

    fn stage_interactive(&self, project_root: &Path) -> Result<()> {
        (**self).stage_interactive(project_root)
    }
}
