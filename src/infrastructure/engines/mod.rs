//! Render engine adapters

mod mustache;

pub use mustache::MustacheEngine;

use crate::domain::ports::EngineRegistry;

/// Engines available to the CLI
pub fn default_engines() -> EngineRegistry {
    EngineRegistry::new().with_engine(MustacheEngine::new())
}
