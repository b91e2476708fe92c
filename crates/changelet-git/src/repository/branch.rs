use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Short name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] if HEAD does not point at a branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        match head.shorthand() {
            Some(name) if head.is_branch() => Ok(name.to_string()),
            _ => Err(GitError::DetachedHead),
        }
    }

    /// Creates `name` at HEAD and switches to it, leaving the working tree
    /// and index untouched. Equivalent to `git checkout -b <name>`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::BranchExists`] if the branch already exists.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        if self
            .inner
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
        {
            return Err(GitError::BranchExists {
                name: name.to_string(),
            });
        }

        let head = self.inner.head()?.peel_to_commit()?;
        let branch = self.inner.branch(name, &head, false)?;

        let refname = branch
            .get()
            .name()
            .ok_or_else(|| GitError::RefNotFound {
                refspec: name.to_string(),
            })?
            .to_string();
        self.inner.set_head(&refname)?;

        tracing::debug!(branch = name, "switched to new branch");
        Ok(())
    }
}
