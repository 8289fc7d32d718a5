//! Configuration module for PatternKit
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PATTERNKIT_*)
//! 3. Project config (patternkit.toml)
//! 4. User config (~/.config/patternkit/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE_NAME};
pub use types::{Config, LoggingConfig, PathsConfig, WatchConfig, WatchFileConfig};
