//! Poll-based change detector
//!
//! Each pass fingerprints every entry of the patterns directory, every
//! declared watch file and the global data file, then diffs against the
//! previous snapshot. The detector never holds state itself; the caller
//! threads the snapshot from one pass to the next.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::WatchFileConfig;
use crate::domain::value_objects::EntryName;
use crate::error::{PatternKitError, PatternKitResult};
use crate::infrastructure::discovery::DIRECTORY_DATA_FILE;
use crate::infrastructure::fs::fingerprint_file;

use super::change::{ChangeKind, ChangeSet, GlobalDataChange, WatchFileChange};
use super::event::WatchOptions;
use super::snapshot::{EntryFingerprint, WatchSnapshot};

#[derive(Debug, Clone)]
pub struct ChangeDetector {
    patterns_dir: PathBuf,
    source_dir: PathBuf,
    template_extension: String,
    ignore: HashSet<String>,
    watch_files: Vec<WatchFileConfig>,
    data_file: PathBuf,
    data_label: String,
}

impl ChangeDetector {
    pub fn new(options: &WatchOptions) -> Self {
        Self {
            patterns_dir: options.patterns_dir.clone(),
            source_dir: options.source_dir.clone(),
            template_extension: options.template_extension.clone(),
            ignore: options.ignore.iter().cloned().collect(),
            watch_files: options.watch_files.clone(),
            data_file: options.data_file.clone(),
            data_label: options.data_label.clone(),
        }
    }

    /// One full pass against `previous`.
    ///
    /// Missing files fingerprint as empty and never fail the pass. A missing
    /// patterns directory does, and `previous` stays the caller's state.
    pub fn scan_once(&self, previous: &WatchSnapshot) -> PatternKitResult<(WatchSnapshot, ChangeSet)> {
        let primed = previous.is_primed();
        let mut next = WatchSnapshot::new();
        let mut changes = ChangeSet::default();

        for name in self.entry_names()? {
            let template_file = name.template_file(&self.template_extension);
            let dir = self.patterns_dir.join(name.as_str());
            let current = EntryFingerprint {
                pattern: fingerprint_file(&dir.join(&template_file)),
                data: fingerprint_file(&dir.join(DIRECTORY_DATA_FILE)),
            };
            let template_label = format!("{name}/{template_file}");

            match previous.entry(&name) {
                None => {
                    if primed && !current.pattern.is_missing() {
                        changes.push_pattern(name.clone(), ChangeKind::Added, template_label);
                    }
                }
                Some(known) => {
                    if known.pattern != current.pattern {
                        let kind = if known.pattern.is_missing() {
                            ChangeKind::Added
                        } else {
                            ChangeKind::Modified
                        };
                        changes.push_pattern(name.clone(), kind, template_label);
                    }
                    if known.data != current.data {
                        changes.push_pattern(
                            name.clone(),
                            ChangeKind::DataModified,
                            format!("{name}/{DIRECTORY_DATA_FILE}"),
                        );
                    }
                }
            }

            next.insert_entry(name, current);
        }

        if primed {
            for (name, _) in previous.entries() {
                if next.entry(name).is_none() {
                    changes.push_pattern(name.clone(), ChangeKind::Removed, name.to_string());
                }
            }
        }

        for watch_file in &self.watch_files {
            let current = fingerprint_file(&self.source_dir.join(&watch_file.source));
            let changed = previous
                .watch_file(&watch_file.source)
                .is_some_and(|known| *known != current);
            if changed && !current.is_missing() {
                changes.watch_files.push(WatchFileChange {
                    source: watch_file.source.clone(),
                    dest: watch_file.dest().to_path_buf(),
                });
            }
            next.insert_watch_file(watch_file.source.clone(), current);
        }

        let current = fingerprint_file(&self.data_file);
        if previous.global_data().is_some_and(|known| *known != current) {
            changes.global_data = Some(GlobalDataChange {
                file: self.data_label.clone(),
            });
        }
        next.set_global_data(current);

        next.mark_primed();
        Ok((next, changes))
    }

    /// Directory entries of the patterns root, sorted by name
    fn entry_names(&self) -> PatternKitResult<Vec<EntryName>> {
        let read = fs::read_dir(&self.patterns_dir).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PatternKitError::MissingDirectory {
                    path: self.patterns_dir.clone(),
                }
            } else {
                e.into()
            }
        })?;

        let mut names = Vec::new();
        for entry in read {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 entry");
                continue;
            };
            if self.ignore.contains(&name) {
                continue;
            }
            match EntryName::new(name) {
                Ok(name) => names.push(name),
                Err(e) => tracing::warn!(error = %e, "skipping entry"),
            }
        }
        names.sort();
        Ok(names)
    }
}
