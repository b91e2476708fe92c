use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use changelet_core::Pr;
use changelet_git::{CommandRunner, GitError, render_command};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{PrProvider, PullRequestPublisher};

pub const DEFAULT_MAX_LOOKBACK: u32 = 50;

const PR_LIST_FIELDS: &str = "files,mergedAt,number,url";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubCliOptions {
    /// `owner/name`; defaults to the repository `gh` infers from the checkout.
    pub repo: Option<String>,
    /// How many of the most recently merged PRs are searched.
    pub max_lookback: u32,
    /// Overrides the project's base branch for the lookup.
    pub base: Option<String>,
}

impl Default for GitHubCliOptions {
    fn default() -> Self {
        Self {
            repo: None,
            max_lookback: DEFAULT_MAX_LOOKBACK,
            base: None,
        }
    }
}

#[derive(Deserialize)]
struct GhFile {
    path: String,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    number: u64,
    #[serde(deserialize_with = "deserialize_merged_at")]
    merged_at: DateTime<Utc>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    files: Vec<GhFile>,
}

fn parse_merged_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn deserialize_merged_at<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_merged_at(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid mergedAt timestamp '{raw}'")))
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Merged PRs that touched the entry directory, by number and by file.
#[derive(Debug, Default)]
struct PrIndex {
    by_id: HashMap<u64, Arc<Pr>>,
    by_file: HashMap<PathBuf, Arc<Pr>>,
}

impl PrIndex {
    fn parse(json: &str, directory: &Path, repo: Option<&str>) -> Result<Self> {
        let pulls: Vec<GhPullRequest> =
            serde_json::from_str(json).map_err(OperationError::MalformedPrList)?;

        let mut index = Self::default();

        for pull in pulls {
            let files: Vec<PathBuf> = pull
                .files
                .iter()
                .map(|f| normalize(Path::new(&f.path)))
                .filter(|path| path.starts_with(directory))
                .collect();

            if files.is_empty() {
                continue;
            }

            let url = match (pull.url, repo) {
                (Some(url), _) => url,
                (None, Some(repo)) => format!("https://github.com/{repo}/pull/{}", pull.number),
                (None, None) => return Err(OperationError::PrWithoutUrl { number: pull.number }),
            };

            let pr = Arc::new(Pr::new(pull.number, url, pull.merged_at));
            index.by_id.insert(pull.number, Arc::clone(&pr));
            for file in files {
                index.by_file.insert(file, Arc::clone(&pr));
            }
        }

        Ok(index)
    }
}

/// Looks up merged pull requests with the GitHub CLI.
///
/// The first lookup lists recently merged PRs in a single `gh pr list` call;
/// every later lookup is answered from that listing. `gh` reports file paths
/// from the repository root, so lookups are keyed the same way.
pub struct GitHubCli<R> {
    runner: R,
    root: PathBuf,
    repo_prefix: PathBuf,
    directory: PathBuf,
    base: String,
    options: GitHubCliOptions,
    index: OnceLock<PrIndex>,
}

impl<R: CommandRunner> GitHubCli<R> {
    #[must_use]
    pub fn new(
        runner: R,
        root: impl Into<PathBuf>,
        directory: &Path,
        base_branch: &str,
        options: GitHubCliOptions,
    ) -> Self {
        let base = options
            .base
            .clone()
            .unwrap_or_else(|| base_branch.to_string());
        Self {
            runner,
            root: root.into(),
            repo_prefix: PathBuf::new(),
            directory: normalize(directory),
            base,
            options,
            index: OnceLock::new(),
        }
    }

    /// Places the project at `prefix` inside the git work tree.
    #[must_use]
    pub fn within_repository(mut self, prefix: &Path) -> Self {
        self.repo_prefix = normalize(prefix);
        self
    }

    #[must_use]
    pub fn options(&self) -> &GitHubCliOptions {
        &self.options
    }

    fn list_args(&self) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "list".to_string(),
            "--base".to_string(),
            self.base.clone(),
            "--state".to_string(),
            "merged".to_string(),
            format!("--limit={}", self.options.max_lookback),
            "--json".to_string(),
            PR_LIST_FIELDS.to_string(),
        ];
        if let Some(repo) = &self.options.repo {
            args.push("--repo".to_string());
            args.push(repo.clone());
        }
        args
    }

    fn fetch(&self) -> Result<PrIndex> {
        let args = self.list_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.runner.run(&self.root, "gh", &args)?;
        if !output.success {
            return Err(GitError::CommandFailed {
                command: render_command("gh", &args),
                stderr: output.stderr,
            }
            .into());
        }

        let directory = self.repo_prefix.join(&self.directory);
        let index = PrIndex::parse(&output.stdout, &directory, self.options.repo.as_deref())?;
        tracing::debug!(
            prs = index.by_id.len(),
            files = index.by_file.len(),
            base = %self.base,
            "indexed merged pull requests"
        );
        Ok(index)
    }

    fn index(&self) -> Result<&PrIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let index = self.fetch()?;
        Ok(self.index.get_or_init(|| index))
    }

    fn relative_key(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.repo_prefix.join(normalize(relative))
    }
}

impl<R: CommandRunner> PrProvider for GitHubCli<R> {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        Ok(self.index()?.by_id.get(&id).cloned())
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        let key = self.relative_key(path);
        Ok(self.index()?.by_file.get(&key).cloned())
    }
}

impl<R> std::fmt::Debug for GitHubCli<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubCli")
            .field("repo_prefix", &self.repo_prefix)
            .field("directory", &self.directory)
            .field("base", &self.base)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Opens pull requests with `gh pr create`.
#[derive(Debug, Clone, Default)]
pub struct GhPublisher<R> {
    runner: R,
}

impl<R: CommandRunner> GhPublisher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> PullRequestPublisher for GhPublisher<R> {
    fn create_pull_request(
        &self,
        project_root: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<Option<String>> {
        let args = [
            "pr", "create", "--base", base, "--title", title, "--body", body,
        ];
        let output = self.runner.run(project_root, "gh", &args)?;
        if !output.success {
            return Err(GitError::CommandFailed {
                command: render_command("gh", &args[..6]),
                stderr: output.stderr,
            }
            .into());
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(String::from))
    }
}
