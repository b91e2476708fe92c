use std::path::Path;

use crate::Result;

pub trait PullRequestPublisher: Send + Sync {
    /// Opens a pull request from the current branch into `base`. Returns the
    /// new PR's URL when the backend reports one.
    ///
    /// # Errors
    ///
    /// Returns an error if the pull request cannot be created.
    fn create_pull_request(
        &self,
        project_root: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<Option<String>>;
}

impl<P: PullRequestPublisher + ?Sized> PullRequestPublisher for &P {
    fn create_pull_request(
        &self,
        project_root: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<Option<String>> {
        (**self).create_pull_request(project_root, base, title, body)
    }
}
