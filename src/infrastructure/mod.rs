//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Fingerprinting, atomic writes, copies and the build lock
//! - `discovery` - Full scan of the patterns tree into a registry
//! - `engines/` - Render engine adapters (Mustache partial scanner)
//! - `site` - Build collaborators writing the public tree

pub mod discovery;
pub mod engines;
pub mod fs;
pub mod site;

// Re-export for convenience
pub use discovery::{discover, Discovery, SkippedFile};
pub use engines::{default_engines, MustacheEngine};
pub use site::LocalSite;
