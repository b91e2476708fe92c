mod entry_store;
mod git;
mod github;
mod lazy;
mod registry;

pub use entry_store::FileSystemEntryStore;
pub use git::Git2Provider;
pub use github::{DEFAULT_MAX_LOOKBACK, GhPublisher, GitHubCli, GitHubCliOptions};
pub use lazy::LazyProvider;
pub use registry::{ProviderContext, ProviderFactory, ProviderRegistry};
