mod branch;
mod commit;
mod diff;
mod remote;
mod staging;
mod worktree;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

/// A non-bare repository found from some path inside its working tree.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// Walks up from `path` to the enclosing working tree, so a project may
    /// live in a subdirectory of the repository.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if no repository encloses `path`
    /// or the one found is bare.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repository = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = git2::Repository::discover(path).map_err(|_| not_a_repository())?;
        let root = match inner.workdir() {
            // dunce drops the \\?\ prefix on Windows
            Some(workdir) => dunce::simplified(workdir).to_path_buf(),
            None => return Err(not_a_repository()),
        };

        tracing::trace!(root = %root.display(), "opened repository");
        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `path` relative to the working tree root. Relative input is taken as
    /// already rooted; absolute input outside the tree comes back unchanged.
    #[must_use]
    pub fn to_relative_path(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            return path.to_path_buf();
        }

        if let Ok(relative) = dunce::simplified(path).strip_prefix(&self.root) {
            return relative.to_path_buf();
        }

        // symlinked temp dirs, e.g. /var vs /private/var on macOS
        let canonical = (dunce::canonicalize(path), dunce::canonicalize(&self.root));
        if let (Ok(path), Ok(root)) = canonical {
            if let Ok(relative) = path.strip_prefix(&root) {
                return relative.to_path_buf();
            }
        }
        path.to_path_buf()
    }
}
