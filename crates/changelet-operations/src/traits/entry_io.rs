use std::path::{Path, PathBuf};

use changelet_core::Entry;
use changelet_parse::EntryDocument;

use crate::Result;
use crate::traits::PrProvider;

pub trait EntryReader: Send + Sync {
    /// Loads one entry, resolving its PR through `provider`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the PR lookup
    /// fails.
    fn load(&self, path: &Path, provider: &dyn PrProvider) -> Result<Entry>;

    /// Loads every entry in `dir` in release order. Entries without a resolved
    /// PR are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any entry cannot be read.
    fn load_all(&self, dir: &Path, provider: &dyn PrProvider) -> Result<Vec<Entry>>;
}

pub trait EntryWriter: Send + Sync {
    /// Writes `entry` to `filename`, or back to its own file when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded or written.
    fn save(&self, entry: &mut Entry, filename: Option<&Path>) -> Result<()>;

    /// Writes a new entry under a fresh unique name in `dir` and returns its
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded or written.
    fn create(&self, dir: &Path, document: &EntryDocument) -> Result<PathBuf>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove(&self, path: &Path) -> Result<()>;
}

impl<R: EntryReader + ?Sized> EntryReader for &R {
    fn load(&self, path: &Path, provider: &dyn PrProvider) -> Result<Entry> {
        (**self).load(path, provider)
    }

    fn load_all(&self, dir: &Path, provider: &dyn PrProvider) -> Result<Vec<Entry>> {
        (**self).load_all(dir, provider)
    }
}

impl<W: EntryWriter + ?Sized> EntryWriter for &W {
    fn save(&self, entry: &mut Entry, filename: Option<&Path>) -> Result<()> {
        (**self).save(entry, filename)
    }

    fn create(&self, dir: &Path, document: &EntryDocument) -> Result<PathBuf> {
        (**self).create(dir, document)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        (**self).remove(path)
    }
}
