mod bump;
mod check;
mod create;
mod steps;

pub use bump::{
    BumpInput, BumpOperation, BumpOutcome, BumpPlan, ReleaseBranch, commit_message,
    next_version, release_branch_name,
};
pub use check::{CheckOperation, CheckOutcome, MissingReason};
pub use create::{CreateInput, CreateOperation, CreateOutput};
