use std::path::Path;
use std::process::ExitCode;

use changelet_operations::operations::{CreateInput, CreateOperation};
use changelet_operations::providers::{FileSystemEntryStore, Git2Provider};
use changelet_project::Project;

use super::CreateArgs;
use crate::error::Result;

pub(crate) fn run(args: CreateArgs, root: &Path) -> Result<ExitCode> {
    let project = Project::discover(root)?;
    let operation = CreateOperation::new(FileSystemEntryStore::new(), Git2Provider::new());

    let output = operation.execute(
        &project,
        CreateInput {
            entry_type: args.entry_type,
            pr: args.pr,
            description: args.description,
            stage: args.add,
        },
    )?;

    if output.staged {
        println!(
            "Created {}, it has been staged and should be committed to your branch.",
            output.path.display()
        );
    } else {
        println!(
            "Created {}, it can be further edited and should be committed to your branch.",
            output.path.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}
