use crate::{CommitInfo, GitError, Result};

use super::Repository;

impl Repository {
    /// Records the index as a new commit on the current branch.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NothingStaged`] if the index matches HEAD, which
    /// happens when every hunk was declined during interactive staging.
    pub fn commit(&self, message: &str) -> Result<CommitInfo> {
        let tree = {
            let mut index = self.inner.index()?;
            let tree_id = index.write_tree()?;
            self.inner.find_tree(tree_id)?
        };

        let parent = match self.inner.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        if parent.as_ref().is_some_and(|p| p.tree_id() == tree.id()) {
            return Err(GitError::NothingStaged);
        }

        let author = self.inner.signature()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self
            .inner
            .commit(Some("HEAD"), &author, &author, message, &tree, &parents)?;

        tracing::debug!(sha = %oid, message, "committed");
        Ok(CommitInfo {
            sha: oid.to_string(),
            message: message.to_string(),
        })
    }
}
