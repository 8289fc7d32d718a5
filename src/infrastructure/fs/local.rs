//! Local File System helpers
//!
//! Fingerprinting, atomic writes and single-file copies against local disk.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::domain::entities::PatternData;
use crate::domain::value_objects::FileFingerprint;
use crate::error::{PatternKitError, PatternKitResult};

/// Fingerprint a file's content.
///
/// A missing or unreadable file is `FileFingerprint::Missing`, never an
/// error: absence is a state the change detector compares like any other.
pub fn fingerprint_file(path: &Path) -> FileFingerprint {
    match fs::read(path) {
        Ok(content) => FileFingerprint::of_bytes(&content),
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "unreadable file treated as missing");
            }
            FileFingerprint::Missing
        }
    }
}

/// Write content to a file atomically
///
/// Uses tempfile + rename so readers of the public tree never observe a
/// half-written file. Parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> PatternKitResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| PatternKitError::Io(e.error))?;
    Ok(())
}

/// Copy one file, overwriting the destination and creating its parents
pub fn copy_file(source: &Path, dest: &Path) -> PatternKitResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

/// Read a JSON object from disk. A missing file is an empty object.
pub fn read_json_object(path: &Path) -> PatternKitResult<PatternData> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PatternData::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(PatternData::new());
    }

    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(PatternKitError::InvalidData {
            file: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(e) => Err(PatternKitError::InvalidData {
            file: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
