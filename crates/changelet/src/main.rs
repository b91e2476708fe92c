mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "changelet")]
#[command(version = env!("CHANGELET_VERSION"))]
#[command(about = "Record changelog entries per change and roll them into releases", long_about = None)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Increase log output, repeat for more detail
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let root = match resolve_root(cli.path) {
        Ok(root) => root,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.execute(&root) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path = match path {
        Some(p) => p,
        None => std::env::current_dir().map_err(CliError::CurrentDir)?,
    };
    // resolves `..` so the module name comes from a real directory name
    dunce::canonicalize(&path).map_err(|source| CliError::InvalidPath { path, source })
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
