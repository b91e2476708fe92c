mod bump;
mod check;
mod create;

use std::path::Path;
use std::process::ExitCode;

use changelet_core::EntryType;
use clap::{Args, Subcommand};
use semver::Version;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Creates a new changelog entry
    Create(CreateArgs),
    /// Checks that the current branch contains a changelog entry
    Check,
    /// Builds a changelog update and calculates a new version number
    Bump(BumpArgs),
}

#[derive(Args)]
pub(crate) struct CreateArgs {
    /// The scope of the change, see https://semver.org/
    #[arg(short = 't', long = "type", value_enum)]
    pub entry_type: EntryType,

    /// Override the PR number for the change, maintainer use only
    #[arg(short, long)]
    pub pr: Option<u64>,

    /// `git add` the newly created entry
    #[arg(short, long)]
    pub add: bool,

    /// A short, single-line description suitable for CHANGELOG.md. Simple
    /// markdown and links are allowed.
    #[arg(value_name = "CHANGE-DESCRIPTION", required = true, num_args = 1..)]
    pub description: Vec<String>,
}

#[derive(Args)]
pub(crate) struct BumpArgs {
    /// Release this version instead of the computed one
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<Version>,

    /// Write the changelog update and bump the version number
    #[arg(long)]
    pub make_changes: bool,

    /// Cut a release branch, commit, push and open a pull request. Implies
    /// --make-changes
    #[arg(long)]
    pub pr: bool,

    /// A short title for the release
    #[arg(value_name = "TITLE")]
    pub title: Vec<String>,
}

impl Commands {
    pub(crate) fn execute(self, root: &Path) -> Result<ExitCode> {
        match self {
            Self::Create(args) => create::run(args, root),
            Self::Check => check::run(root),
            Self::Bump(args) => bump::run(args, root),
        }
    }
}
