//! Watch entry names
//!
//! The change detector keys its snapshot by the names of entries directly
//! under the patterns directory. Names are validated so that a key always
//! denotes exactly one child of that directory.

use std::fmt;

use crate::error::{PatternKitError, PatternKitResult};

/// A validated name of an entry directly inside the patterns directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryName(String);

impl EntryName {
    pub fn new(name: impl Into<String>) -> PatternKitResult<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." {
            Some("relative directory markers are not entries")
        } else if name.contains('/') || name.contains('\\') {
            Some("name contains a path separator")
        } else if name.chars().any(char::is_control) {
            Some("name contains control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PatternKitError::InvalidEntryName {
                name,
                reason: reason.to_string(),
            }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Template file name for this entry: `<entry>.<ext>`
    pub fn template_file(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
