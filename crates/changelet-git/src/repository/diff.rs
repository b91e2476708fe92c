use std::path::{Path, PathBuf};

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Files that differ between `base` and the working tree, limited to
    /// `within` when given. Staged and unstaged edits to tracked files are
    /// both reported; untracked files are not, matching `git diff <base>`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if `base` cannot be resolved.
    pub fn changed_files_since(
        &self,
        base: &str,
        within: Option<&Path>,
    ) -> Result<Vec<FileChange>> {
        let base_tree = self.resolve_tree(base)?;

        let mut opts = git2::DiffOptions::new();
        if let Some(dir) = within {
            let relative = self.to_relative_path(dir);
            if !relative.as_os_str().is_empty() {
                opts.pathspec(relative);
            }
        }

        let mut diff = self
            .inner
            .diff_tree_to_workdir_with_index(Some(&base_tree), Some(&mut opts))?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified => FileStatus::Modified,
                git2::Delta::Renamed => FileStatus::Renamed,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            changes.push(FileChange::new(path, status));
        }

        tracing::debug!(base, count = changes.len(), "computed changed files");
        Ok(changes)
    }

    fn resolve_tree(&self, refspec: &str) -> Result<git2::Tree<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_tree().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}
