//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PatternKitError, PatternKitResult};

use super::types::Config;

/// Project config file name
pub const CONFIG_FILE_NAME: &str = "patternkit.toml";

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Collected while loading, before logging is initialized, so the CLI prints
/// them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    UnknownKey {
        key: String,
        file: PathBuf,
        line: Option<usize>,
        suggestion: Option<String>,
    },
    InvalidEnv {
        var: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownKey {
                key,
                file,
                line,
                suggestion,
            } => {
                write!(f, "unknown config key '{key}' in {}", file.display())?;
                if let Some(line) = line {
                    write!(f, ":{line}")?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{suggestion}'?)")?;
                }
                Ok(())
            }
            ConfigWarning::InvalidEnv { var, value } => {
                write!(f, "ignoring invalid {var}={value:?}")
            }
        }
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PatternKitResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PatternKitError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::UnknownKey {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env overrides.
///
/// A config file that exists but fails to parse is an error; silently
/// falling back would watch the wrong tree.
pub fn load_or_default(project_root: &Path) -> PatternKitResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE_NAME);
    if project_config.exists() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok(apply_env_overrides(config, warnings));
    }

    if let Some(user_config_dir) = dirs::config_dir() {
        let user_config = user_config_dir.join("patternkit").join("config.toml");
        if user_config.exists() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok(apply_env_overrides(config, warnings));
        }
    }

    Ok(apply_env_overrides(Config::default(), Vec::new()))
}

/// Apply environment variable overrides (PATTERNKIT_* prefix).
///
/// Unusable values are skipped and appended to `warnings`.
pub fn apply_env_overrides(
    mut config: Config,
    mut warnings: Vec<ConfigWarning>,
) -> (Config, Vec<ConfigWarning>) {
    if let Ok(source) = std::env::var("PATTERNKIT_SOURCE") {
        if !source.is_empty() {
            config.paths.source = PathBuf::from(source);
        }
    }

    if let Ok(public) = std::env::var("PATTERNKIT_PUBLIC") {
        if !public.is_empty() {
            config.paths.public = PathBuf::from(public);
        }
    }

    if let Ok(interval) = std::env::var("PATTERNKIT_INTERVAL_MS") {
        match interval.trim().parse::<u64>() {
            Ok(ms) => config.watch.interval_ms = ms,
            Err(_) => warnings.push(ConfigWarning::InvalidEnv {
                var: "PATTERNKIT_INTERVAL_MS",
                value: interval,
            }),
        }
    }

    if let Ok(level) = std::env::var("PATTERNKIT_LOG") {
        if !level.is_empty() {
            config.logging.default = level.to_lowercase();
        }
    }

    (config, warnings)
}

/// 1-based line where `key` is assigned
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .trim_start_matches('"')
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start_matches('"').trim_start().starts_with('='))
        })
        .map(|index| index + 1)
}

/// Closest known key within two edits
fn suggest_key(unknown: &str) -> Option<String> {
    const KNOWN_KEYS: &[&str] = &[
        "paths",
        "source",
        "public",
        "patterns",
        "data_file",
        "watch",
        "interval_ms",
        "template_extension",
        "ignore",
        "files",
        "dest",
        "logging",
        "default",
        "modules",
    ];

    KNOWN_KEYS
        .iter()
        .map(|known| (edit_distance(unknown, known), *known))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known.to_string())
}

/// Levenshtein distance over chars, one row at a time
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}
