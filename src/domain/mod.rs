//! Domain Layer
//!
//! Pattern identity, registry and the ports the build core calls into.
//!
//! ## Structure
//!
//! - `entities/` - Pattern identity, registry, navigation tree
//! - `value_objects/` - Immutable value types (ContentHash, EntryName)
//! - `ports/` - Render engine and build collaborator interfaces
//!
//! This layer never touches the file system; discovery lives in
//! `infrastructure/` and the watch loop in `application/`.

pub mod entities;
pub mod ports;
pub mod value_objects;
