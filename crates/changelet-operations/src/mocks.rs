use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use changelet_core::Pr;
use changelet_git::{CommandOutput, CommandRunner, CommitInfo, FileChange, GitError};
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::Result;
use crate::traits::{GitProvider, PrProvider, PullRequestPublisher};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A merged PR `days_ago` days before a fixed reference time.
#[must_use]
pub fn pr(id: u64, days_ago: i64) -> Arc<Pr> {
    Arc::new(Pr::new(
        id,
        format!("https://github.com/octodns/changelet/pull/{id}"),
        reference_time() - Duration::days(days_ago),
    ))
}

pub struct MockPrProvider {
    by_id: HashMap<u64, Arc<Pr>>,
    by_file: HashMap<PathBuf, Arc<Pr>>,
    filename_lookups: AtomicUsize,
}

impl MockPrProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_file: HashMap::new(),
            filename_lookups: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_id(mut self, pr: Arc<Pr>) -> Self {
        self.by_id.insert(pr.id, pr);
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: &Path, pr: Arc<Pr>) -> Self {
        self.by_file.insert(path.to_path_buf(), pr);
        self
    }

    #[must_use]
    pub fn filename_lookups(&self) -> usize {
        self.filename_lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockPrProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PrProvider for MockPrProvider {
    fn pr_by_id(&self, id: u64) -> Result<Option<Arc<Pr>>> {
        Ok(self.by_id.get(&id).cloned())
    }

    fn pr_by_filename(&self, path: &Path) -> Result<Option<Arc<Pr>>> {
        self.filename_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.by_file.get(path).cloned())
    }
}

/// Replays queued outputs in order, then succeeds with empty output.
pub struct MockCommandRunner {
    outputs: Mutex<VecDeque<CommandOutput>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_output(self, output: CommandOutput) -> Self {
        self.outputs
            .lock()
            .expect("lock poisoned")
            .push_back(output);
        self
    }

    /// Each recorded call as the program followed by its arguments.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, program: &str, args: &[&str]) {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(ToString::to_string));
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl Default for MockCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(
        &self,
        _dir: &Path,
        program: &str,
        args: &[&str],
    ) -> changelet_git::Result<CommandOutput> {
        self.record(program, args);
        Ok(self
            .outputs
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| CommandOutput::success("")))
    }

    fn run_interactive(
        &self,
        _dir: &Path,
        program: &str,
        args: &[&str],
    ) -> changelet_git::Result<()> {
        self.record(program, args);
        Ok(())
    }
}

/// Records every git operation by name, in order, in a shared call log.
pub struct MockGitProvider {
    changed_files: Vec<FileChange>,
    clean: bool,
    branch: String,
    remote_url: Option<String>,
    failing: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    diff_requests: Mutex<Vec<(String, PathBuf)>>,
    staged_files: Mutex<Vec<PathBuf>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changed_files: Vec::new(),
            clean: true,
            branch: "main".to_string(),
            remote_url: Some("git@github.com:octodns/changelet.git".to_string()),
            failing: None,
            calls: Mutex::new(Vec::new()),
            diff_requests: Mutex::new(Vec::new()),
            staged_files: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: Vec<FileChange>) -> Self {
        self.changed_files = files;
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    #[must_use]
    pub fn is_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub fn without_remote(mut self) -> Self {
        self.remote_url = None;
        self
    }

    /// Makes the named operation fail.
    #[must_use]
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing = Some(operation);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn diff_requests(&self) -> Vec<(String, PathBuf)> {
        self.diff_requests.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.staged_files.lock().expect("lock poisoned").clone()
    }

    fn record(&self, operation: &'static str, detail: &[&str]) -> Result<()> {
        let mut call = operation.to_string();
        for part in detail {
            call.push(' ');
            call.push_str(part);
        }
        self.calls.lock().expect("lock poisoned").push(call);

        if self.failing == Some(operation) {
            return Err(GitError::CommandFailed {
                command: operation.to_string(),
                stderr: "mock failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files(
        &self,
        _project_root: &Path,
        base: &str,
        within: &Path,
    ) -> Result<Vec<FileChange>> {
        self.diff_requests
            .lock()
            .expect("lock poisoned")
            .push((base.to_string(), within.to_path_buf()));
        self.record("changed_files", &[base])?;
        Ok(self.changed_files.clone())
    }

    fn is_working_tree_clean(&self, _project_root: &Path) -> Result<bool> {
        self.record("is_working_tree_clean", &[])?;
        Ok(self.clean)
    }

    fn current_branch(&self, _project_root: &Path) -> Result<String> {
        self.record("current_branch", &[])?;
        Ok(self.branch.clone())
    }

    fn remote_url(&self, _project_root: &Path, remote: &str) -> Result<Option<String>> {
        self.record("remote_url", &[remote])?;
        Ok(self.remote_url.clone())
    }

    fn stage_files(&self, _project_root: &Path, paths: &[&Path]) -> Result<()> {
        self.record("stage_files", &[])?;
        self.staged_files
            .lock()
            .expect("lock poisoned")
            .extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(())
    }

    fn create_branch(&self, _project_root: &Path, name: &str) -> Result<()> {
        self.record("create_branch", &[name])
    }

    fn commit(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.record("commit", &[message])?;
        Ok(CommitInfo {
            sha: "abc1234".to_string(),
            message: message.to_string(),
        })
    }

    fn pull(&self, _project_root: &Path) -> Result<()> {
        self.record("pull", &[])
    }

    fn push_upstream(&self, _project_root: &Path, remote: &str, branch: &str) -> Result<()> {
        self.record("push_upstream", &[remote, branch])
    }

    fn stage_interactive(&self, _project_root: &Path) -> Result<()> {
        self.record("stage_interactive", &[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    pub base: String,
    pub title: String,
    pub body: String,
}

pub struct MockPublisher {
    url: Option<String>,
    requests: Mutex<Vec<PullRequestRequest>>,
}

impl MockPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<PullRequestRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PullRequestPublisher for MockPublisher {
    fn create_pull_request(
        &self,
        _project_root: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<Option<String>> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(PullRequestRequest {
                base: base.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            });
        Ok(self.url.clone())
    }
}
