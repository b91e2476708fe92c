pub mod entry;
pub mod error;
pub mod types;

pub use entry::{Entry, sort_entries};
pub use error::*;
pub use types::*;
