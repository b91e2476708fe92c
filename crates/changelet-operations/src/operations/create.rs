use std::path::PathBuf;

use changelet_core::EntryType;
use changelet_parse::EntryDocument;
use changelet_project::Project;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{EntryWriter, GitProvider};

#[derive(Debug, Clone, Default)]
pub struct CreateInput {
    pub entry_type: EntryType,
    pub pr: Option<u64>,
    /// Description words, joined with single spaces.
    pub description: Vec<String>,
    pub stage: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutput {
    /// Location of the new entry, relative to the project root.
    pub path: PathBuf,
    pub staged: bool,
}

pub struct CreateOperation<W, G> {
    entry_writer: W,
    git_provider: G,
}

impl<W, G> CreateOperation<W, G>
where
    W: EntryWriter,
    G: GitProvider,
{
    pub fn new(entry_writer: W, git_provider: G) -> Self {
        Self {
            entry_writer,
            git_provider,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the description is empty, the entry directory or
    /// file cannot be written, or staging fails.
    pub fn execute(&self, project: &Project, input: CreateInput) -> Result<CreateOutput> {
        let description = input.description.join(" ");
        let description = description.trim();
        if description.is_empty() {
            return Err(OperationError::EmptyDescription);
        }

        let dir = project.ensure_entry_dir()?;
        let document = EntryDocument {
            entry_type: input.entry_type,
            pr: input.pr,
            description: description.to_string(),
        };
        let created = self.entry_writer.create(&dir, &document)?;

        if input.stage {
            self.git_provider
                .stage_files(project.root(), &[created.as_path()])?;
        }

        let path = created
            .strip_prefix(project.root())
            .map_or_else(|_| created.clone(), std::path::Path::to_path_buf);

        tracing::info!(path = %path.display(), entry_type = %input.entry_type, staged = input.stage, "created changelog entry");

        Ok(CreateOutput {
            path,
            staged: input.stage,
        })
    }
}
