//! Pattern discovery
//!
//! Full scan of the patterns tree into a fresh registry. Used for the
//! initial build and for every full data re-gather the dispatcher triggers.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::entities::{PatternData, PatternIdentity, PatternOverrides, PatternRegistry};
use crate::domain::ports::EngineRegistry;
use crate::error::{PatternKitError, PatternKitResult};

use super::fs::read_json_object;

/// Name of the per-directory fallback data file
pub const DIRECTORY_DATA_FILE: &str = "data.json";

/// Separates a template base name from a pseudo-pattern variant
pub const PSEUDO_PATTERN_MARKER: char = '~';

/// A file that was found but not added to the registry
#[derive(Debug)]
pub struct SkippedFile {
    pub relative_path: String,
    pub error: PatternKitError,
}

/// Result of a full scan
#[derive(Debug)]
pub struct Discovery {
    pub registry: PatternRegistry,
    pub skipped: Vec<SkippedFile>,
}

/// Walk `patterns_root` and build a registry with lineage.
///
/// Entries are visited in file-name order so registry order, and everything
/// built from it, is reproducible. Hidden files and names in `ignore` are
/// never visited. Per-file failures land in `skipped`; only a missing root
/// fails the scan.
pub fn discover(
    patterns_root: &Path,
    engines: &EngineRegistry,
    ignore: &[String],
) -> PatternKitResult<Discovery> {
    if !patterns_root.is_dir() {
        return Err(PatternKitError::MissingDirectory {
            path: patterns_root.to_path_buf(),
        });
    }

    let files = walk(patterns_root, ignore);
    let pseudo_files = collect_pseudo_patterns(&files);

    let mut registry = PatternRegistry::new(engines.clone());
    let mut skipped = Vec::new();

    for relative in files.iter().filter(|f| !is_json(f)) {
        let (directory, file_name) = split(relative);
        let base = base_name(file_name);

        let data = match pattern_data(patterns_root, directory, base) {
            Ok(data) => data,
            Err(error) => {
                skipped.push(SkippedFile {
                    relative_path: relative.clone(),
                    error,
                });
                continue;
            }
        };

        let mut pattern = match registry.create_from_path(relative, Some(data), Default::default()) {
            Ok(pattern) => pattern,
            Err(error) => {
                skipped.push(SkippedFile {
                    relative_path: relative.clone(),
                    error,
                });
                continue;
            }
        };

        if let Err(error) = pattern.engine() {
            skipped.push(SkippedFile {
                relative_path: relative.clone(),
                error,
            });
            continue;
        }

        match fs::read_to_string(patterns_root.join(relative)) {
            Ok(template) => pattern.set_template(template),
            Err(e) => {
                skipped.push(SkippedFile {
                    relative_path: relative.clone(),
                    error: e.into(),
                });
                continue;
            }
        }

        let variants = pseudo_files
            .get(&(directory.to_string(), base.to_string()))
            .cloned()
            .unwrap_or_default();

        let base_unique = pattern.unique_name().to_string();
        let base_template = pattern.template().to_string();
        let base_data = pattern.raw_data().clone();
        let extension = pattern.file_extension().to_string();

        assign_partial_identifier(&mut pattern);
        if let Err(error) = registry.add(pattern) {
            skipped.push(SkippedFile {
                relative_path: relative.clone(),
                error,
            });
            continue;
        }

        for (variant, variant_file) in variants {
            let pseudo_path = join(directory, &format!("{base}-{variant}.{extension}"));
            let result = read_json_object(&patterns_root.join(&variant_file)).and_then(|variant_data| {
                let mut data = base_data.clone();
                data.extend(variant_data);
                registry.create_from_path(
                    &pseudo_path,
                    Some(data),
                    PatternOverrides {
                        template: Some(base_template.clone()),
                        is_pseudo_pattern: Some(true),
                        base_pattern: Some(base_unique.clone()),
                        ..Default::default()
                    },
                )
            });
            match result.and_then(|mut pseudo| {
                assign_partial_identifier(&mut pseudo);
                registry.add(pseudo)
            }) {
                Ok(()) => tracing::debug!(pattern = %pseudo_path, base = %base_unique, "pseudo-pattern added"),
                Err(error) => skipped.push(SkippedFile {
                    relative_path: variant_file,
                    error,
                }),
            }
        }
    }

    registry.build_lineage();

    tracing::debug!(
        root = %patterns_root.display(),
        patterns = registry.len(),
        skipped = skipped.len(),
        "discovery complete"
    );

    Ok(Discovery { registry, skipped })
}

/// Relative, `/`-separated paths of every file under `root`, in walk order
fn walk(root: &Path, ignore: &[String]) -> Vec<String> {
    let ignored: HashSet<String> = ignore.iter().cloned().collect();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !ignored.contains(name))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
        match parts {
            Some(parts) => files.push(parts.join("/")),
            None => tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path"),
        }
    }
    files
}

/// `(directory, base) -> [(variant, relative file)]` for every `<base>~<variant>.json`
/// Discovered patterns are addressed by their registry key in partials
fn assign_partial_identifier(pattern: &mut PatternIdentity) {
    if pattern.partial_identifier().is_empty() {
        let partial = pattern.registry_key().to_string();
        pattern.set_partial_identifier(partial);
    }
}

fn collect_pseudo_patterns(files: &[String]) -> BTreeMap<(String, String), Vec<(String, String)>> {
    let mut pseudo: BTreeMap<(String, String), Vec<(String, String)>> = BTreeMap::new();
    for relative in files.iter().filter(|f| is_json(f)) {
        let (directory, file_name) = split(relative);
        let Some((base, variant)) = base_name(file_name).split_once(PSEUDO_PATTERN_MARKER) else {
            continue;
        };
        if base.is_empty() || variant.is_empty() {
            continue;
        }
        pseudo
            .entry((directory.to_string(), base.to_string()))
            .or_default()
            .push((variant.to_string(), relative.clone()));
    }
    pseudo
}

/// `<base>.json` beside the template, else the directory's `data.json`
fn pattern_data(root: &Path, directory: &str, base: &str) -> PatternKitResult<PatternData> {
    let own = root.join(join(directory, &format!("{base}.json")));
    if own.is_file() {
        return read_json_object(&own);
    }
    read_json_object(&root.join(join(directory, DIRECTORY_DATA_FILE)))
}

fn is_json(relative: &str) -> bool {
    relative.ends_with(".json")
}

fn split(relative: &str) -> (&str, &str) {
    relative.rsplit_once('/').unwrap_or(("", relative))
}

fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

fn join(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        file_name.to_string()
    } else {
        format!("{directory}/{file_name}")
    }
}
