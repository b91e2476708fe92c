use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::types::{EntryType, Pr};

/// A single changelog entry backed by a file in the entry directory.
///
/// Two entries are equal when they share filename, type and description. The
/// resolved PR does not take part in equality since it is derived data.
#[derive(Debug, Clone)]
pub struct Entry {
    pub entry_type: EntryType,
    pub description: String,
    pub pr: Option<Arc<Pr>>,
    pub filename: PathBuf,
}

impl Entry {
    #[must_use]
    pub fn new(
        entry_type: EntryType,
        description: impl Into<String>,
        filename: impl Into<PathBuf>,
    ) -> Self {
        Self {
            entry_type,
            description: description.into(),
            pr: None,
            filename: filename.into(),
        }
    }

    #[must_use]
    pub fn with_pr(mut self, pr: impl Into<Arc<Pr>>) -> Self {
        self.pr = Some(pr.into());
        self
    }

    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    #[must_use]
    pub fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.pr.as_ref().map(|pr| pr.merged_at)
    }

    /// One-line markdown bullet, linking the PR when one is known.
    #[must_use]
    pub fn markdown(&self) -> String {
        match &self.pr {
            Some(pr) => format!("* {} - {}", self.description, pr.markdown()),
            None => format!("* {}", self.description),
        }
    }

    /// One-line plain-text bullet, using the bare PR URL.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.pr {
            Some(pr) => format!("* {} - {}", self.description, pr.plain()),
            None => format!("* {}", self.description),
        }
    }

    /// Release ordering: higher severity first, then most recently merged.
    /// Entries without a PR sort as the oldest of their type.
    #[must_use]
    pub fn release_order(&self, other: &Self) -> Ordering {
        other
            .entry_type
            .cmp(&self.entry_type)
            .then_with(|| other.merged_at().cmp(&self.merged_at()))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.filename == other.filename
            && self.entry_type == other.entry_type
            && self.description == other.description
    }
}

impl Eq for Entry {}

/// Stable sort into release order, see [`Entry::release_order`].
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(Entry::release_order);
}
