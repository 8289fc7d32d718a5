//! Content fingerprints
//!
//! The change detector compares files by content, never by modification
//! time, so touching a file without changing it is not a change.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 of a file's bytes, rendered as `sha256:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    pub fn of(content: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(content)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint of a path that may or may not exist.
///
/// A missing file is a valid, comparable state: it is the empty hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FileFingerprint {
    #[default]
    Missing,
    Present(ContentHash),
}

impl FileFingerprint {
    pub fn of_bytes(content: &[u8]) -> Self {
        FileFingerprint::Present(ContentHash::of(content))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FileFingerprint::Missing)
    }

    /// The hash string, or `""` when the file is missing
    pub fn as_str(&self) -> &str {
        match self {
            FileFingerprint::Missing => "",
            FileFingerprint::Present(hash) => hash.as_str(),
        }
    }
}
