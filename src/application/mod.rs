//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Poll loop: detect changes, dispatch rebuilds

pub mod watch;

pub use watch::{
    ChangeDetector, ChangeKind, ChangeSet, RebuildDispatcher, RebuildReport, WatchEvent,
    WatchOptions, WatchSnapshot, WatchUseCase,
};
