use std::path::PathBuf;

use changelet_changelog::{Changelog, ReleaseSection};
use changelet_core::Entry;
use changelet_version::VersionFile;
use semver::Version;

use crate::Result;
use crate::error::OperationError;
use crate::traits::EntryWriter;

/// One filesystem mutation of a bump. Steps run in order and are not rolled
/// back when a later step fails.
pub(crate) trait MutationStep {
    fn name(&self) -> &'static str;

    fn apply(&self) -> Result<()>;
}

pub(crate) struct PrependChangelog<'a> {
    path: PathBuf,
    section: &'a ReleaseSection,
}

impl<'a> PrependChangelog<'a> {
    pub(crate) fn new(path: impl Into<PathBuf>, section: &'a ReleaseSection) -> Self {
        Self {
            path: path.into(),
            section,
        }
    }
}

impl MutationStep for PrependChangelog<'_> {
    fn name(&self) -> &'static str {
        "update changelog"
    }

    fn apply(&self) -> Result<()> {
        Changelog::prepend_to_file(&self.path, self.section)?;
        Ok(())
    }
}

pub(crate) struct WriteVersion<'a> {
    file: &'a VersionFile,
    version: &'a Version,
}

impl<'a> WriteVersion<'a> {
    pub(crate) fn new(file: &'a VersionFile, version: &'a Version) -> Self {
        Self { file, version }
    }
}

impl MutationStep for WriteVersion<'_> {
    fn name(&self) -> &'static str {
        "update version"
    }

    fn apply(&self) -> Result<()> {
        self.file.write_version(self.version)?;
        Ok(())
    }
}

pub(crate) struct RemoveEntries<'a, W> {
    writer: &'a W,
    entries: &'a [Entry],
}

impl<'a, W: EntryWriter> RemoveEntries<'a, W> {
    pub(crate) fn new(writer: &'a W, entries: &'a [Entry]) -> Self {
        Self { writer, entries }
    }
}

impl<W: EntryWriter> MutationStep for RemoveEntries<'_, W> {
    fn name(&self) -> &'static str {
        "remove entries"
    }

    fn apply(&self) -> Result<()> {
        for entry in self.entries {
            self.writer.remove(entry.filename())?;
        }
        Ok(())
    }
}

/// Applies `steps` in order, stopping at the first failure. Returns the names
/// of the completed steps.
pub(crate) fn apply_steps(steps: &[&dyn MutationStep]) -> Result<Vec<&'static str>> {
    let mut completed = Vec::with_capacity(steps.len());

    for step in steps {
        tracing::debug!(step = step.name(), "applying");

        if let Err(source) = step.apply() {
            tracing::warn!(step = step.name(), completed = ?completed, "step failed, earlier changes are kept");
            return Err(OperationError::StepFailed {
                step: step.name(),
                completed,
                source: Box::new(source),
            });
        }
        completed.push(step.name());
    }

    Ok(completed)
}
