use std::path::Path;
use std::sync::Arc;

use changelet_core::Pr;

use crate::Result;

/// Resolves the merged pull request that introduced a changelog entry.
pub trait PrProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the provider's backing lookup fails.
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>>;

    /// Looks up the PR that added `path`, which may be absolute or relative to
    /// the project root.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's backing lookup fails.
    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>>;
}

impl<P: PrProvider + ?Sized> PrProvider for &P {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_id(id)
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_filename(path)
    }
}

impl<P: PrProvider + ?Sized> PrProvider for Box<P> {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_id(id)
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_filename(path)
    }
}

impl<P: PrProvider + ?Sized> PrProvider for Arc<P> {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_id(id)
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        (**self).pr_by_filename(path)
    }
}
