mod error;
mod parse;
mod serialize;

pub use error::FormatError;
pub use parse::{EntryDocument, parse_entry};
pub use serialize::serialize_entry;
