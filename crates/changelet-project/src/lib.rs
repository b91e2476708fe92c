mod config;
mod error;
mod project;

pub const DEFAULT_ENTRY_DIR: &str = ".changelog";
pub const DEFAULT_PROVIDER_CLASS: &str = "changelet.github.GitHubCli";
pub const CONFIG_FILENAME: &str = ".changelet.yaml";
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

pub use config::{Config, ConfigSource, ProviderSettings, load_config};
pub use error::ProjectError;
pub use project::Project;

pub type Result<T> = std::result::Result<T, ProjectError>;
