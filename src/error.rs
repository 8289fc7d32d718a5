//! Error types for patternkit
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for patternkit operations
pub type PatternKitResult<T> = Result<T, PatternKitError>;

/// Main error type for patternkit operations
#[derive(Error, Debug)]
pub enum PatternKitError {
    /// A watched or scanned directory does not exist. Fatal to the current scan pass.
    #[error("directory not found: {path}")]
    MissingDirectory { path: PathBuf },

    /// A file looks like a template but no render engine handles its extension
    #[error("no render engine registered for '{extension}' ({path})")]
    UnsupportedTemplateType { path: String, extension: String },

    /// Two different source files normalize to the same unique name
    #[error("duplicate pattern '{unique_name}': {existing} and {incoming}")]
    DuplicateUniqueName {
        unique_name: String,
        existing: String,
        incoming: String,
    },

    /// A directory entry name that cannot be used as a watch key
    #[error("invalid watch entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: String },

    /// An identity override failed validation
    #[error("invalid override for '{field}': {reason}")]
    InvalidOverride { field: &'static str, reason: String },

    /// A render engine failed to render a pattern
    #[error("failed to render {pattern}: {message}")]
    Render { pattern: String, message: String },

    /// A data file parsed, but is not a JSON object
    #[error("invalid data in {file}: {message}")]
    InvalidData { file: PathBuf, message: String },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The public output tree is locked by another rebuild
    #[error("failed to lock {path}: {message}")]
    Lock { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PatternKitError {
    /// Whether the error should abort the current scan pass.
    ///
    /// Everything else is reported per entry and the pass continues.
    pub fn is_pass_fatal(&self) -> bool {
        matches!(self, PatternKitError::MissingDirectory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_directory() {
        let err = PatternKitError::MissingDirectory {
            path: PathBuf::from("source/_patterns"),
        };
        assert_eq!(err.to_string(), "directory not found: source/_patterns");
        assert!(err.is_pass_fatal());
    }

    #[test]
    fn test_error_display_unsupported_template() {
        let err = PatternKitError::UnsupportedTemplateType {
            path: "00-atoms/button.twig".to_string(),
            extension: "twig".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no render engine registered for 'twig' (00-atoms/button.twig)"
        );
        assert!(!err.is_pass_fatal());
    }

    #[test]
    fn test_error_display_duplicate() {
        let err = PatternKitError::DuplicateUniqueName {
            unique_name: "00-atoms-a-b".to_string(),
            existing: "00-atoms/a-b.mustache".to_string(),
            incoming: "00-atoms/a/b.mustache".to_string(),
        };
        assert!(err.to_string().contains("00-atoms-a-b"));
        assert!(err.to_string().contains("00-atoms/a/b.mustache"));
    }
}
