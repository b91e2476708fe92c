use std::path::Path;
use std::process::ExitCode;

use changelet_operations::operations::{CheckOperation, CheckOutcome};
use changelet_operations::providers::Git2Provider;
use changelet_project::Project;

use crate::error::Result;

pub(crate) fn run(root: &Path) -> Result<ExitCode> {
    let project = Project::discover(root)?;

    match CheckOperation::new(Git2Provider::new()).execute(&project) {
        CheckOutcome::Present(entries) => {
            tracing::info!(count = entries.len(), "found changelog entries");
            Ok(ExitCode::SUCCESS)
        }
        CheckOutcome::Missing(reason) => {
            tracing::debug!(reason = ?reason, "no changelog entry");
            eprintln!("PR is missing required changelog file, run changelet create");
            Ok(ExitCode::FAILURE)
        }
    }
}
