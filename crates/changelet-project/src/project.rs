use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigSource, load_config};
use crate::error::ProjectError;

/// A project root together with its resolved configuration.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: Config,
    source: ConfigSource,
}

impl Project {
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn discover(root: &Path) -> Result<Self, ProjectError> {
        let (config, source) = load_config(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            source,
        })
    }

    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            source: ConfigSource::Default,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn config_source(&self) -> &ConfigSource {
        &self.source
    }

    #[must_use]
    pub fn entry_dir(&self) -> PathBuf {
        self.root.join(&self.config.directory)
    }

    /// # Errors
    ///
    /// Returns [`ProjectError::CreateDir`] if the directory cannot be created.
    pub fn ensure_entry_dir(&self) -> Result<PathBuf, ProjectError> {
        let dir = self.entry_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|source| ProjectError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            tracing::debug!(path = %dir.display(), "created entry directory");
        }
        Ok(dir)
    }
}
