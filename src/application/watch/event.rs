//! Watch event types and options

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, WatchFileConfig};

use super::change::{ChangeKind, ChangeSet};

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Source root; watch-file paths are relative to it
    pub source_dir: PathBuf,
    /// Directory whose entries are scanned each pass
    pub patterns_dir: PathBuf,
    /// Public output root; the build lock lives here
    pub public_dir: PathBuf,
    /// Global data file
    pub data_file: PathBuf,
    /// How the global data file is named in notices
    pub data_label: String,
    pub template_extension: String,
    /// Entry names never scanned
    pub ignore: Vec<String>,
    pub watch_files: Vec<WatchFileConfig>,
    /// Minimum delay between passes
    pub interval: Duration,
    /// Stop after this many passes; `None` runs until cancelled
    pub max_passes: Option<usize>,
    /// Take `<public>/.patternkit.lock` around every rebuild
    pub build_lock: bool,
}

impl WatchOptions {
    /// Resolve every path in `config` against `project_root`
    pub fn from_config(config: &Config, project_root: &Path) -> Self {
        Self {
            source_dir: config.source_dir(project_root),
            patterns_dir: config.patterns_dir(project_root),
            public_dir: config.public_dir(project_root),
            data_file: config.data_file(project_root),
            data_label: config.paths.data_file.to_string_lossy().replace('\\', "/"),
            template_extension: config.watch.template_extension.clone(),
            ignore: config.watch.ignore.clone(),
            watch_files: config.watch.files.clone(),
            interval: config.watch.interval(),
            max_passes: None,
            build_lock: true,
        }
    }

    /// Set the minimum delay between passes
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Bound the number of passes
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_build_lock(mut self, build_lock: bool) -> Self {
        self.build_lock = build_lock;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted { source: String, interval_ms: u64 },
    /// New pattern entry, or its template appeared
    PatternAdded { entry: String, file: String },
    /// Template content changed
    PatternChanged { entry: String, file: String },
    /// Entry directory disappeared
    PatternRemoved { entry: String },
    /// Entry `data.json` changed
    DataChanged { entry: String, file: String },
    /// User-declared watch file changed and was moved
    WatchFileChanged { path: String },
    /// Global data file changed
    GlobalDataChanged { path: String },
    /// A rebuild finished
    RebuildComplete {
        full: bool,
        main_pages: bool,
        rendered: usize,
        files_moved: usize,
    },
    /// Error occurred; the loop keeps running
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Console notice for change events
    pub fn message(&self) -> Option<String> {
        match self {
            WatchEvent::PatternAdded { file, .. } => Some(format!("{file} added to Pattern Lab...")),
            WatchEvent::PatternChanged { file, .. } | WatchEvent::DataChanged { file, .. } => {
                Some(format!("{file} changed..."))
            }
            WatchEvent::PatternRemoved { entry } => Some(format!("{entry} removed from Pattern Lab...")),
            WatchEvent::WatchFileChanged { path } | WatchEvent::GlobalDataChanged { path } => {
                Some(format!("{path} changed..."))
            }
            _ => None,
        }
    }

    /// One event per change, in detection order
    pub fn from_changes(changes: &ChangeSet) -> Vec<WatchEvent> {
        let mut events: Vec<WatchEvent> = changes
            .patterns
            .iter()
            .map(|change| {
                let entry = change.entry.to_string();
                let file = change.file.clone();
                match change.kind {
                    ChangeKind::Added => WatchEvent::PatternAdded { entry, file },
                    ChangeKind::Modified => WatchEvent::PatternChanged { entry, file },
                    ChangeKind::DataModified => WatchEvent::DataChanged { entry, file },
                    ChangeKind::Removed => WatchEvent::PatternRemoved { entry },
                }
            })
            .collect();

        events.extend(changes.watch_files.iter().map(|c| WatchEvent::WatchFileChanged {
            path: c.source.to_string_lossy().replace('\\', "/"),
        }));
        events.extend(changes.global_data.iter().map(|c| WatchEvent::GlobalDataChanged {
            path: c.file.clone(),
        }));
        events
    }
}
