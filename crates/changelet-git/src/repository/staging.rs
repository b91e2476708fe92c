use std::path::{Path, PathBuf};

use crate::Result;

use super::Repository;

impl Repository {
    /// Brings the index in line with the working tree for exactly these
    /// paths, like `git add -A -- <paths>`: new and modified files are
    /// added, files deleted from disk are dropped from the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated or written.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let specs: Vec<PathBuf> = paths.iter().map(|p| self.to_relative_path(p)).collect();

        let mut index = self.inner.index()?;
        index.add_all(
            specs.iter().map(PathBuf::as_path),
            git2::IndexAddOption::DISABLE_PATHSPEC_MATCH,
            None,
        )?;
        index.update_all(specs.iter().map(PathBuf::as_path), None)?;
        index.write()?;

        tracing::debug!(paths = specs.len(), "staged paths");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, setup_test_repo};
    use std::fs;
    use std::path::Path;

    fn staged(repo: &super::Repository, path: &str) -> anyhow::Result<bool> {
        Ok(repo.inner.index()?.get_path(Path::new(path), 0).is_some())
    }

    #[test]
    fn new_entry_in_new_directory() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        fs::create_dir_all(dir.path().join(".changelog"))?;
        fs::write(dir.path().join(".changelog/brave-otter.md"), "---\ntype: patch\n---\nx")?;

        repo.stage_files(&[Path::new(".changelog/brave-otter.md")])?;

        assert!(staged(&repo, ".changelog/brave-otter.md")?);
        Ok(())
    }

    #[test]
    fn only_listed_paths_are_staged() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        fs::write(dir.path().join("CHANGELOG.md"), "## 1.0.0")?;
        fs::write(dir.path().join("notes.txt"), "scratch")?;

        let absolute = repo.root().join("CHANGELOG.md");
        repo.stage_files(&[absolute.as_path()])?;

        assert!(staged(&repo, "CHANGELOG.md")?);
        assert!(!staged(&repo, "notes.txt")?);
        Ok(())
    }

    #[test]
    fn removed_entry_leaves_index() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_file(&repo, ".changelog/entry.md", "---\ntype: patch\n---\nfix")?;

        fs::remove_file(dir.path().join(".changelog/entry.md"))?;
        repo.stage_files(&[Path::new(".changelog/entry.md")])?;

        assert!(!staged(&repo, ".changelog/entry.md")?);
        Ok(())
    }

    #[test]
    fn nothing_to_stage() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        repo.stage_files(&[])?;
        assert!(repo.inner.index()?.is_empty());
        Ok(())
    }
}
