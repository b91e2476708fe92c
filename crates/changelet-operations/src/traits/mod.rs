mod entry_io;
mod git_provider;
mod pr_provider;
mod publisher;

pub use entry_io::{EntryReader, EntryWriter};
pub use git_provider::GitProvider;
pub use pr_provider::PrProvider;
pub use publisher::PullRequestPublisher;
