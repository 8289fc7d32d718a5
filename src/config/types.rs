//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PatternKitResult;

use super::loader::{self, ConfigWarning};

/// Source and output locations. Relative paths resolve against the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_public")]
    pub public: PathBuf,

    /// Patterns directory, relative to `source`
    #[serde(default = "default_patterns")]
    pub patterns: PathBuf,

    /// Global data file, relative to `source`
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            public: default_public(),
            patterns: default_patterns(),
            data_file: default_data_file(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("source")
}

fn default_public() -> PathBuf {
    PathBuf::from("public")
}

fn default_patterns() -> PathBuf {
    PathBuf::from("_patterns")
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/data.json")
}

/// A non-pattern file copied verbatim to the public tree when it changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchFileConfig {
    /// Path relative to the source root
    pub source: PathBuf,

    /// Path relative to the public root; defaults to `source`
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

impl WatchFileConfig {
    pub fn dest(&self) -> &Path {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Minimum delay between two scan passes
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Extension of `<entry>/<entry>.<ext>` template files
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Entry names under the patterns directory that are never scanned
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub files: Vec<WatchFileConfig>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            template_extension: default_template_extension(),
            ignore: default_ignore(),
            files: Vec::new(),
        }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    250
}

fn default_template_extension() -> String {
    "mustache".to_string()
}

fn default_ignore() -> Vec<String> {
    [".DS_Store", ".gitkeep", ".svn", ".git"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Logging configuration
///
/// ```toml
/// [logging]
/// default = "warn"
///
/// [logging.modules]
/// patternkit = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: BTreeMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PatternKitResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PatternKitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: &Path) -> PatternKitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (PATTERNKIT_* prefix)
    pub fn with_env_overrides(self, warnings: Vec<ConfigWarning>) -> (Self, Vec<ConfigWarning>) {
        loader::apply_env_overrides(self, warnings)
    }

    pub fn source_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.source)
    }

    pub fn public_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.public)
    }

    pub fn patterns_dir(&self, project_root: &Path) -> PathBuf {
        self.source_dir(project_root).join(&self.paths.patterns)
    }

    pub fn data_file(&self, project_root: &Path) -> PathBuf {
        self.source_dir(project_root).join(&self.paths.data_file)
    }
}
