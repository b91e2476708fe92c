use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("cannot derive a module name from project root '{0}'")]
    NoModuleName(PathBuf),

    #[error("no version file found for module '{module}' (looked for {})", candidates.join(", "))]
    FileNotFound {
        module: String,
        candidates: Vec<String>,
    },

    #[error("failed to read version file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write version file '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid version declaration pattern")]
    Pattern(#[from] regex::Error),

    #[error("no __version__ declaration in '{path}'")]
    MissingDeclaration { path: PathBuf },

    #[error("invalid version '{version}' in '{path}'")]
    Parse {
        path: PathBuf,
        version: String,
        #[source]
        source: semver::Error,
    },
}
