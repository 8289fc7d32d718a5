//! Change detector state

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{EntryName, FileFingerprint};

/// Fingerprints of one patterns-directory entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFingerprint {
    /// `<entry>/<entry>.<ext>`
    pub pattern: FileFingerprint,
    /// `<entry>/data.json`
    pub data: FileFingerprint,
}

/// Everything the detector remembers between passes.
///
/// Process-local and rebuilt from empty at start. Entry keys are validated
/// names, so a key can never alias a reserved field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchSnapshot {
    primed: bool,
    entries: BTreeMap<EntryName, EntryFingerprint>,
    watch_files: BTreeMap<PathBuf, FileFingerprint>,
    global_data: Option<FileFingerprint>,
}

impl WatchSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// False until the first completed pass
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub(super) fn mark_primed(&mut self) {
        self.primed = true;
    }

    pub fn entry(&self, name: &EntryName) -> Option<&EntryFingerprint> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&EntryName, &EntryFingerprint)> {
        self.entries.iter()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn insert_entry(&mut self, name: EntryName, fingerprint: EntryFingerprint) {
        self.entries.insert(name, fingerprint);
    }

    pub fn watch_file(&self, source: &Path) -> Option<&FileFingerprint> {
        self.watch_files.get(source)
    }

    pub fn insert_watch_file(&mut self, source: PathBuf, fingerprint: FileFingerprint) {
        self.watch_files.insert(source, fingerprint);
    }

    pub fn global_data(&self) -> Option<&FileFingerprint> {
        self.global_data.as_ref()
    }

    pub fn set_global_data(&mut self, fingerprint: FileFingerprint) {
        self.global_data = Some(fingerprint);
    }
}
