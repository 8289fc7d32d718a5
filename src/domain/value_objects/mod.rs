//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod entry_name;
mod hash;

pub use entry_name::EntryName;
pub use hash::{ContentHash, FileFingerprint};
