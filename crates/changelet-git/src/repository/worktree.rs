use std::path::PathBuf;

use crate::Result;

use super::Repository;

impl Repository {
    /// Paths with staged, unstaged or untracked changes, sorted. Ignored
    /// files are left out, as `git status --porcelain` does.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot compute the status.
    pub fn uncommitted_paths(&self) -> Result<Vec<PathBuf>> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.inner.statuses(Some(&mut opts))?;
        let mut paths: Vec<PathBuf> = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// # Errors
    ///
    /// Returns an error if git cannot compute the status.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        let dirty = self.uncommitted_paths()?;
        if let Some(first) = dirty.first() {
            tracing::debug!(count = dirty.len(), first = %first.display(), "working tree is dirty");
        }
        Ok(dirty.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, setup_test_repo};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn fresh_repository_is_clean() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        assert!(repo.is_working_tree_clean()?);
        assert!(repo.uncommitted_paths()?.is_empty());
        Ok(())
    }

    #[test]
    fn untracked_entry_makes_tree_dirty() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        fs::create_dir_all(dir.path().join(".changelog"))?;
        fs::write(dir.path().join(".changelog/new.md"), "---\ntype: patch\n---\nx")?;

        assert!(!repo.is_working_tree_clean()?);
        assert_eq!(
            repo.uncommitted_paths()?,
            [PathBuf::from(".changelog/new.md")]
        );
        Ok(())
    }

    #[test]
    fn modified_and_deleted_files_are_listed() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_file(&repo, "widget.py", "__version__ = '1.0.0'\n")?;
        commit_file(&repo, ".changelog/a.md", "---\ntype: minor\n---\nadd")?;

        fs::write(dir.path().join("widget.py"), "__version__ = '1.1.0'\n")?;
        fs::remove_file(dir.path().join(".changelog/a.md"))?;

        assert_eq!(
            repo.uncommitted_paths()?,
            [PathBuf::from(".changelog/a.md"), PathBuf::from("widget.py")]
        );
        Ok(())
    }

    #[test]
    fn ignored_files_do_not_count() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_file(&repo, ".gitignore", "target/\n")?;
        fs::create_dir_all(dir.path().join("target"))?;
        fs::write(dir.path().join("target/build.log"), "noise")?;

        assert!(repo.is_working_tree_clean()?);
        Ok(())
    }
}
