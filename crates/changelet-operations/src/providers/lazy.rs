use std::path::Path;
use std::sync::{Arc, OnceLock};

use changelet_core::Pr;
use changelet_project::{Project, ProviderSettings};

use crate::Result;
use crate::providers::registry::{ProviderContext, ProviderRegistry};
use crate::traits::PrProvider;

/// Builds the configured provider on first lookup and reuses it afterwards.
/// Commands that never resolve a PR never construct one.
pub struct LazyProvider {
    registry: ProviderRegistry,
    context: ProviderContext,
    settings: ProviderSettings,
    provider: OnceLock<Box<dyn PrProvider>>,
}

impl LazyProvider {
    #[must_use]
    pub fn new(
        registry: ProviderRegistry,
        context: ProviderContext,
        settings: ProviderSettings,
    ) -> Self {
        Self {
            registry,
            context,
            settings,
            provider: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn for_project(registry: ProviderRegistry, project: &Project) -> Self {
        Self::new(
            registry,
            ProviderContext::from_project(project),
            project.config().provider.clone(),
        )
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.provider.get().is_some()
    }

    fn provider(&self) -> Result<&dyn PrProvider> {
        if let Some(provider) = self.provider.get() {
            return Ok(provider.as_ref());
        }
        let provider = self.registry.build(&self.context, &self.settings)?;
        Ok(self.provider.get_or_init(|| provider).as_ref())
    }
}

impl PrProvider for LazyProvider {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        self.provider()?.pr_by_id(id)
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        self.provider()?.pr_by_filename(path)
    }
}
