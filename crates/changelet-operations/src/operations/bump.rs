use std::path::PathBuf;

use changelet_changelog::{CHANGELOG_FILENAME, ReleaseSection};
use changelet_core::Entry;
use changelet_git::CommitInfo;
use changelet_project::Project;
use changelet_version::{VersionFile, bump_version};
use chrono::NaiveDate;
use semver::Version;

use super::steps::{PrependChangelog, RemoveEntries, WriteVersion, apply_steps};
use crate::Result;
use crate::error::OperationError;
use crate::traits::{EntryReader, EntryWriter, GitProvider, PrProvider, PullRequestPublisher};

#[derive(Debug, Clone)]
pub struct BumpInput {
    pub title: Option<String>,
    /// Write the release to disk instead of only reporting it.
    pub make_changes: bool,
    /// Cut a release branch and open a pull request. Implies `make_changes`.
    pub pr: bool,
    pub version: Option<Version>,
    pub date: NaiveDate,
}

impl BumpInput {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: None,
            make_changes: false,
            pr: false,
            version: None,
            date,
        }
    }
}

/// The release a bump would produce.
#[derive(Debug, Clone)]
pub struct BumpPlan {
    pub current: Version,
    pub next: Version,
    pub version_file: PathBuf,
    pub section: ReleaseSection,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
pub struct ReleaseBranch {
    pub branch: String,
    pub commit: CommitInfo,
    pub pr_url: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BumpOutcome {
    /// No entry warrants a release.
    NothingToDo,
    DryRun(BumpPlan),
    Applied {
        plan: BumpPlan,
        release: Option<ReleaseBranch>,
    },
}

/// The version to release. An explicit override always wins; otherwise the
/// first entry in release order decides, and a `none` entry there means no
/// release.
#[must_use]
pub fn next_version(
    current: &Version,
    entries: &[Entry],
    version_override: Option<&Version>,
) -> Option<Version> {
    if let Some(version) = version_override {
        return Some(version.clone());
    }

    entries
        .first()
        .and_then(|entry| entry.entry_type.bump_type())
        .map(|bump_type| bump_version(current, bump_type))
}

#[must_use]
pub fn release_branch_name(version: &Version) -> String {
    format!("rel-{}-{}-{}", version.major, version.minor, version.patch)
}

#[must_use]
pub fn commit_message(version: &Version) -> String {
    format!("Version {version} bump & changelog update")
}

pub struct BumpOperation<S, P, G, B> {
    entry_store: S,
    pr_provider: P,
    git_provider: G,
    publisher: B,
}

impl<S, P, G, B> BumpOperation<S, P, G, B>
where
    S: EntryReader + EntryWriter,
    P: PrProvider,
    G: GitProvider,
    B: PullRequestPublisher,
{
    pub fn new(entry_store: S, pr_provider: P, git_provider: G, publisher: B) -> Self {
        Self {
            entry_store,
            pr_provider,
            git_provider,
            publisher,
        }
    }

    /// Computes the next release and, when asked to, applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the release-branch preconditions fail, the version
    /// file or entries cannot be read, or any mutation or git step fails.
    /// Changes made before a failure are left in place.
    pub fn execute(&self, project: &Project, input: BumpInput) -> Result<BumpOutcome> {
        if input.pr {
            self.prepare_release(project)?;
        }

        let version_file = VersionFile::discover(project.root())?;
        let entries = self
            .entry_store
            .load_all(&project.entry_dir(), &self.pr_provider)?;

        let current = version_file.version().clone();
        let Some(next) = next_version(&current, &entries, input.version.as_ref()) else {
            tracing::info!(entries = entries.len(), "no entries warrant a release");
            return Ok(BumpOutcome::NothingToDo);
        };

        tracing::info!(current = %current, next = %next, entries = entries.len(), "computed release");

        let section = ReleaseSection::new(next.clone(), input.date, input.title, &entries);
        let plan = BumpPlan {
            current,
            next,
            version_file: version_file.path().to_path_buf(),
            section,
            entries,
        };

        if !(input.make_changes || input.pr) {
            return Ok(BumpOutcome::DryRun(plan));
        }

        let branch = if input.pr {
            let branch = release_branch_name(&plan.next);
            self.git_provider.create_branch(project.root(), &branch)?;
            Some(branch)
        } else {
            None
        };

        let changelog = project.root().join(CHANGELOG_FILENAME);
        let completed = apply_steps(&[
            &PrependChangelog::new(changelog, &plan.section),
            &WriteVersion::new(&version_file, &plan.next),
            &RemoveEntries::new(&self.entry_store, &plan.entries),
        ])?;
        tracing::debug!(steps = ?completed, "release written");

        let release = match branch {
            Some(branch) => Some(self.publish(project, &plan, branch)?),
            None => None,
        };

        Ok(BumpOutcome::Applied { plan, release })
    }

    fn prepare_release(&self, project: &Project) -> Result<()> {
        let root = project.root();
        let config = project.config();

        let current = self.git_provider.current_branch(root)?;
        if current != config.base_branch {
            return Err(OperationError::NotOnBaseBranch {
                expected: config.base_branch.clone(),
                current,
            });
        }

        if !self.git_provider.is_working_tree_clean(root)? {
            return Err(OperationError::DirtyWorkingTree);
        }

        if self.git_provider.remote_url(root, &config.remote)?.is_none() {
            return Err(OperationError::MissingRemote(config.remote.clone()));
        }

        self.git_provider.pull(root)
    }

    fn publish(&self, project: &Project, plan: &BumpPlan, branch: String) -> Result<ReleaseBranch> {
        let root = project.root();
        let config = project.config();
        let message = commit_message(&plan.next);

        self.git_provider.stage_interactive(root)?;
        let commit = self.git_provider.commit(root, &message)?;
        self.git_provider
            .push_upstream(root, &config.remote, &branch)?;
        let pr_url = self.publisher.create_pull_request(
            root,
            &config.base_branch,
            &message,
            plan.section.as_str(),
        )?;

        tracing::info!(branch = %branch, commit = %commit.sha, pr = ?pr_url, "release branch published");

        Ok(ReleaseBranch {
            branch,
            commit,
            pr_url,
        })
    }
}
