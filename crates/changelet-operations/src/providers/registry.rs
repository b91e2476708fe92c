use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

use changelet_git::{ProcessRunner, Repository};
use changelet_project::{DEFAULT_PROVIDER_CLASS, Project, ProviderSettings};

use crate::Result;
use crate::error::OperationError;
use crate::providers::github::{GitHubCli, GitHubCliOptions};
use crate::traits::PrProvider;

/// What a provider constructor gets to know about the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderContext {
    pub root: PathBuf,
    /// Where `root` sits inside the git work tree; empty when the project
    /// is the repository root or not in a repository at all.
    pub repo_prefix: PathBuf,
    pub directory: PathBuf,
    pub base_branch: String,
}

impl ProviderContext {
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        let repo_prefix = Repository::open(project.root())
            .map(|repo| repo.to_relative_path(project.root()))
            .unwrap_or_default();
        tracing::trace!(prefix = %repo_prefix.display(), "project location in repository");

        Self {
            root: project.root().to_path_buf(),
            repo_prefix,
            directory: project.config().directory.clone(),
            base_branch: project.config().base_branch.clone(),
        }
    }
}

pub type ProviderFactory =
    fn(&ProviderContext, &Map<String, Value>) -> Result<Box<dyn PrProvider>>;

/// Maps provider class names from configuration to constructors.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_PROVIDER_CLASS, github_cli);
        registry.register("github", github_cli);
        registry
    }

    pub fn register(&mut self, class: impl Into<String>, factory: ProviderFactory) {
        self.factories.insert(class.into(), factory);
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    /// # Errors
    ///
    /// Returns [`OperationError::UnknownProvider`] if the class is not
    /// registered, or the provider's own error if its options are invalid.
    pub fn build(
        &self,
        context: &ProviderContext,
        settings: &ProviderSettings,
    ) -> Result<Box<dyn PrProvider>> {
        let factory =
            self.factories
                .get(&settings.class)
                .ok_or_else(|| OperationError::UnknownProvider {
                    class: settings.class.clone(),
                    available: self
                        .factories
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;

        tracing::debug!(class = %settings.class, "constructing PR provider");
        factory(context, &settings.options)
    }
}

fn github_cli(context: &ProviderContext, options: &Map<String, Value>) -> Result<Box<dyn PrProvider>> {
    let options: GitHubCliOptions = serde_json::from_value(Value::Object(options.clone()))
        .map_err(|source| OperationError::InvalidProviderOptions {
            class: String::from("GitHubCli"),
            source,
        })?;

    Ok(Box::new(GitHubCli::new(
        ProcessRunner,
        context.root.clone(),
        &context.directory,
        &context.base_branch,
        options,
    )
    .within_repository(&context.repo_prefix)))
}
