//! Change classification produced by one detector pass

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::EntryName;

/// How a patterns-directory entry changed since the previous pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// New entry, or its template appeared where there was none
    Added,
    /// Template content changed
    Modified,
    /// `data.json` content changed
    DataModified,
    /// Entry directory disappeared
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternChange {
    pub entry: EntryName,
    pub kind: ChangeKind,
    /// Entry-relative file the change was seen on (`<entry>/<entry>.<ext>`)
    pub file: String,
}

impl fmt::Display for PatternChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::Added => write!(f, "{} added to Pattern Lab...", self.file),
            ChangeKind::Modified | ChangeKind::DataModified => write!(f, "{} changed...", self.file),
            ChangeKind::Removed => write!(f, "{} removed from Pattern Lab...", self.file),
        }
    }
}

/// A user-declared watch file whose content changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchFileChange {
    /// Relative to the source root
    pub source: PathBuf,
    /// Relative to the public root
    pub dest: PathBuf,
}

impl fmt::Display for WatchFileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} changed...", self.source.display())
    }
}

/// The global data file changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDataChange {
    /// Relative to the source root, `data/data.json` by default
    pub file: String,
}

impl fmt::Display for GlobalDataChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} changed...", self.file)
    }
}

/// Everything one pass found, in detection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub patterns: Vec<PatternChange>,
    pub watch_files: Vec<WatchFileChange>,
    pub global_data: Option<GlobalDataChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.watch_files.is_empty() && self.global_data.is_none()
    }

    pub fn has_pattern_changes(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Any pattern or global data change rebuilds every pattern
    pub fn needs_full_rebuild(&self) -> bool {
        self.has_pattern_changes() || self.global_data.is_some()
    }

    /// Navigation changes only when the set of patterns does
    pub fn needs_main_pages(&self) -> bool {
        self.patterns
            .iter()
            .any(|c| matches!(c.kind, ChangeKind::Added | ChangeKind::Removed))
    }

    pub fn kinds_for(&self, entry: &str) -> Vec<ChangeKind> {
        self.patterns
            .iter()
            .filter(|c| c.entry.as_str() == entry)
            .map(|c| c.kind)
            .collect()
    }

    /// Human-readable notices, one per change
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.patterns.iter().map(ToString::to_string).collect();
        messages.extend(self.watch_files.iter().map(ToString::to_string));
        messages.extend(self.global_data.iter().map(ToString::to_string));
        messages
    }

    pub(super) fn push_pattern(&mut self, entry: EntryName, kind: ChangeKind, file: String) {
        self.patterns.push(PatternChange { entry, kind, file });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> EntryName {
        EntryName::new(name).unwrap()
    }

    #[test]
    fn messages_follow_log_contract() {
        let mut changes = ChangeSet::default();
        changes.push_pattern(entry("button"), ChangeKind::Added, "button/button.mustache".into());
        changes.push_pattern(entry("card"), ChangeKind::Modified, "card/card.mustache".into());
        changes.push_pattern(entry("card"), ChangeKind::DataModified, "card/data.json".into());
        changes.watch_files.push(WatchFileChange {
            source: PathBuf::from("css/style.css"),
            dest: PathBuf::from("css/style.css"),
        });
        changes.global_data = Some(GlobalDataChange {
            file: "data/data.json".into(),
        });

        assert_eq!(
            changes.messages(),
            [
                "button/button.mustache added to Pattern Lab...",
                "card/card.mustache changed...",
                "card/data.json changed...",
                "css/style.css changed...",
                "data/data.json changed...",
            ]
        );
    }

    #[test]
    fn rebuild_scope() {
        let mut changes = ChangeSet::default();
        assert!(changes.is_empty());
        assert!(!changes.needs_full_rebuild());

        changes.global_data = Some(GlobalDataChange {
            file: "data/data.json".into(),
        });
        assert!(changes.needs_full_rebuild());
        assert!(!changes.needs_main_pages());

        changes.push_pattern(entry("gone"), ChangeKind::Removed, "gone".into());
        assert!(changes.needs_main_pages());
        assert_eq!(changes.kinds_for("gone"), [ChangeKind::Removed]);
    }
}
