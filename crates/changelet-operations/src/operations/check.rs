use std::path::{Path, PathBuf};

use changelet_project::Project;

use crate::traits::GitProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    NoEntryDirectory,
    DiffFailed(String),
    NoEntries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Entry files changed on this branch, relative to the repository root.
    Present(Vec<PathBuf>),
    Missing(MissingReason),
}

impl CheckOutcome {
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

pub struct CheckOperation<G> {
    git_provider: G,
}

impl<G: GitProvider> CheckOperation<G> {
    pub fn new(git_provider: G) -> Self {
        Self { git_provider }
    }

    /// Whether the current branch adds or touches at least one entry file
    /// relative to the configured base ref. A diff that cannot be computed
    /// counts as missing.
    pub fn execute(&self, project: &Project) -> CheckOutcome {
        if !project.entry_dir().is_dir() {
            return CheckOutcome::Missing(MissingReason::NoEntryDirectory);
        }

        let base = project.config().base_ref();
        let changes = match self.git_provider.changed_files(
            project.root(),
            &base,
            &project.config().directory,
        ) {
            Ok(changes) => changes,
            Err(e) => {
                tracing::warn!(base = %base, error = %e, "could not diff against base");
                return CheckOutcome::Missing(MissingReason::DiffFailed(e.to_string()));
            }
        };

        let entries: Vec<PathBuf> = changes
            .into_iter()
            .map(|change| change.path)
            .filter(|path| is_markdown_file(path))
            .collect();

        tracing::debug!(base = %base, entries = ?entries, "checked for changelog entries");

        if entries.is_empty() {
            CheckOutcome::Missing(MissingReason::NoEntries)
        } else {
            CheckOutcome::Present(entries)
        }
    }
}
