use std::path::Path;
use std::process::ExitCode;

use changelet_git::ProcessRunner;
use changelet_operations::operations::{BumpInput, BumpOperation, BumpOutcome, BumpPlan};
use changelet_operations::providers::{
    FileSystemEntryStore, GhPublisher, Git2Provider, LazyProvider, ProviderRegistry,
};
use changelet_project::Project;
use chrono::Local;

use super::BumpArgs;
use crate::error::Result;

pub(crate) fn run(args: BumpArgs, root: &Path) -> Result<ExitCode> {
    let project = Project::discover(root)?;
    let provider = LazyProvider::for_project(ProviderRegistry::with_defaults(), &project);
    let operation = BumpOperation::new(
        FileSystemEntryStore::new(),
        provider,
        Git2Provider::new(),
        GhPublisher::new(ProcessRunner),
    );

    let title = args.title.join(" ");
    let input = BumpInput {
        title: (!title.trim().is_empty()).then_some(title),
        make_changes: args.make_changes,
        pr: args.pr,
        version: args.version,
        date: Local::now().date_naive(),
    };

    match operation.execute(&project, input)? {
        BumpOutcome::NothingToDo => {
            println!("No changelog entries found that would bump, nothing to do");
            Ok(ExitCode::FAILURE)
        }
        BumpOutcome::DryRun(plan) => {
            println!("New version number {}\n", plan.next);
            println!("{}", plan.section);
            Ok(ExitCode::SUCCESS)
        }
        BumpOutcome::Applied { plan, release } => {
            print_applied(&plan);
            if let Some(release) = release {
                println!("Pushed {} ({})", release.branch, release.commit.sha);
                if let Some(url) = release.pr_url {
                    println!("Opened {url}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_applied(plan: &BumpPlan) {
    println!("Released {} (was {})", plan.next, plan.current);
    println!("Updated {}", plan.version_file.display());
    println!("Removed {} changelog entries", plan.entries.len());
}
