use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ProjectError;
use crate::{CONFIG_FILENAME, DEFAULT_ENTRY_DIR, DEFAULT_PROVIDER_CLASS, PYPROJECT_FILENAME};

/// Where a [`Config`] was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Yaml(PathBuf),
    PyProject(PathBuf),
    Default,
}

/// The provider class name plus whatever options its constructor accepts.
/// Options are kept untyped here and validated by the provider registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_class")]
    pub class: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            class: default_provider_class(),
            options: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directory: PathBuf,
    pub base_branch: String,
    pub remote: String,
    pub provider: ProviderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_ENTRY_DIR),
            base_branch: String::from("main"),
            remote: String::from("origin"),
            provider: ProviderSettings::default(),
        }
    }
}

impl Config {
    /// The ref `check` diffs against, e.g. `origin/main`.
    #[must_use]
    pub fn base_ref(&self) -> String {
        format!("{}/{}", self.remote, self.base_branch)
    }
}

fn default_provider_class() -> String {
    String::from(DEFAULT_PROVIDER_CLASS)
}

#[derive(Deserialize)]
struct PyProject {
    tool: Option<PyProjectTool>,
}

#[derive(Deserialize)]
struct PyProjectTool {
    changelet: Option<Config>,
}

fn read_optional(path: &Path) -> Result<Option<String>, ProjectError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProjectError::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn load_yaml(path: &Path) -> Result<Option<Config>, ProjectError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_yml::from_str(&content)
        .map(Some)
        .map_err(|source| ProjectError::YamlParse {
            path: path.to_path_buf(),
            source,
        })
}

fn load_pyproject(path: &Path) -> Result<Option<Config>, ProjectError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };

    let pyproject: PyProject =
        toml::from_str(&content).map_err(|source| ProjectError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(pyproject.tool.and_then(|tool| tool.changelet))
}

/// Loads the configuration for the project rooted at `root`.
///
/// `.changelet.yaml` wins over `[tool.changelet]` in `pyproject.toml`, which
/// wins over the built-in default. An empty YAML file counts as absent.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<(Config, ConfigSource), ProjectError> {
    let yaml_path = root.join(CONFIG_FILENAME);
    if let Some(config) = load_yaml(&yaml_path)? {
        tracing::debug!(path = %yaml_path.display(), "loaded config");
        return Ok((config, ConfigSource::Yaml(yaml_path)));
    }

    let pyproject_path = root.join(PYPROJECT_FILENAME);
    if let Some(config) = load_pyproject(&pyproject_path)? {
        tracing::debug!(path = %pyproject_path.display(), "loaded config");
        return Ok((config, ConfigSource::PyProject(pyproject_path)));
    }

    tracing::debug!("using default config");
    Ok((Config::default(), ConfigSource::Default))
}
