//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod render_engine;
pub mod site_builder;

pub use render_engine::{EngineBinding, EngineRegistry, PartialMap, RenderEngine};
pub use site_builder::{ChangeClock, FileMover, PageGenerator, PatternRenderer, SiteBuilder};
