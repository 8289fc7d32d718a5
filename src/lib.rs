//! PatternKit - incremental builds for pattern libraries
//!
//! PatternKit derives a stable identity for every template under a patterns
//! tree, groups them into a navigation tree, and keeps a public output tree
//! current by polling the source for changes and rebuilding what they touch.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use application::{ChangeSet, WatchEvent, WatchOptions, WatchUseCase};
pub use config::Config;
pub use domain::entities::{PatternIdentity, PatternRegistry};
pub use error::{PatternKitError, PatternKitResult};
pub use infrastructure::{default_engines, discover, LocalSite};
