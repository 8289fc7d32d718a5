//! Watch Use Case
//!
//! Poll-based incremental rebuilds. It orchestrates:
//! - Change detection (content fingerprints diffed against a snapshot)
//! - Rebuild dispatch (full rebuild, single-file move, navigation pages)
//! - An explicit lifecycle (cancellation flag, optional pass limit)
//!
//! ## Architecture
//!
//! - `ChangeDetector` - one stateless scan pass against a `WatchSnapshot`
//! - `RebuildDispatcher` - maps a `ChangeSet` to build collaborator calls
//! - `WatchUseCase` - the loop, owning snapshot and dispatcher
//! - `WatchEvent` - events emitted during watch operation
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::from_config(&config, &project_root);
//! let mut use_case = WatchUseCase::new(options, site);
//! use_case.start(running, |event| { ... })?;
//! ```

mod change;
mod detector;
mod dispatcher;
mod event;
mod snapshot;
mod use_case;


pub use change::{ChangeKind, ChangeSet, GlobalDataChange, PatternChange, WatchFileChange};
pub use detector::ChangeDetector;
pub use dispatcher::{RebuildDispatcher, RebuildReport};
pub use event::{WatchEvent, WatchOptions};
pub use snapshot::{EntryFingerprint, WatchSnapshot};
pub use use_case::WatchUseCase;
