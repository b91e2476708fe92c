use std::path::Path;

use changelet_git::{CommandRunner, CommitInfo, FileChange, GitCli, ProcessRunner, Repository};

use crate::Result;
use crate::traits::GitProvider;

/// Local repository access through libgit2, with network and interactive
/// commands delegated to the `git` binary.
pub struct Git2Provider<R = ProcessRunner> {
    runner: R,
}

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner,
        }
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Git2Provider<R> {
    #[must_use]
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn cli(&self, project_root: &Path) -> GitCli<&R> {
        GitCli::new(&self.runner, project_root)
    }
}

impl<R: CommandRunner> GitProvider for Git2Provider<R> {
    fn changed_files(
        &self,
        project_root: &Path,
        base: &str,
        within: &Path,
    ) -> Result<Vec<FileChange>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changed_files_since(base, Some(&project_root.join(within)))?)
    }

    fn is_working_tree_clean(&self, project_root: &Path) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(repo.is_working_tree_clean()?)
    }

    fn current_branch(&self, project_root: &Path) -> Result<String> {
        let repo = Repository::open(project_root)?;
        Ok(repo.current_branch()?)
    }

    fn remote_url(&self, project_root: &Path, remote: &str) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.remote_url(remote)?)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_files(paths)?)
    }

    fn create_branch(&self, project_root: &Path, name: &str) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.create_branch(name)?)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.commit(message)?)
    }

    fn pull(&self, project_root: &Path) -> Result<()> {
        Ok(self.cli(project_root).pull()?)
    }

    fn push_upstream(&self, project_root: &Path, remote: &str, branch: &str) -> Result<()> {
        Ok(self.cli(project_root).push_upstream(remote, branch)?)
    }

    fn stage_interactive(&self, project_root: &Path) -> Result<()> {
        Ok(self.cli(project_root).add_patch()?)
    }
}
