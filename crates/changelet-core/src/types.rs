use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ChangeletError;

/// Severity of a change as recorded in an entry file.
///
/// Variants are declared in ascending severity so the derived ordering is
/// `None < Patch < Minor < Major`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Not mentioned in the changelog
    #[default]
    None,
    /// A bug fix
    Patch,
    /// New functionality or fully backwards compatible changes
    Minor,
    /// Substantial new functionality or compatibility breaking changes
    Major,
}

impl EntryType {
    #[must_use]
    pub fn bump_type(self) -> Option<BumpType> {
        match self {
            Self::None => None,
            Self::Patch => Some(BumpType::Patch),
            Self::Minor => Some(BumpType::Minor),
            Self::Major => Some(BumpType::Major),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }

    /// Heading used for this type's block in a rendered changelog section.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Patch => "Patch",
            Self::Minor => "Minor",
            Self::Major => "Major",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ChangeletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(ChangeletError::UnknownEntryType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl From<BumpType> for EntryType {
    fn from(bump: BumpType) -> Self {
        match bump {
            BumpType::Patch => Self::Patch,
            BumpType::Minor => Self::Minor,
            BumpType::Major => Self::Major,
        }
    }
}

/// A merged pull request an entry was introduced by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pr {
    pub id: u64,
    pub text: String,
    pub url: String,
    pub merged_at: DateTime<Utc>,
}

impl Pr {
    #[must_use]
    pub fn new(id: u64, url: impl Into<String>, merged_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: format!("#{id}"),
            url: url.into(),
            merged_at,
        }
    }

    #[must_use]
    pub fn markdown(&self) -> String {
        format!("[{}]({})", self.text, self.url)
    }

    #[must_use]
    pub fn plain(&self) -> &str {
        &self.url
    }
}
