//! Unified error types for postpack.
//!
//! This module provides a single [`ArchiveError`] enum that covers all error
//! cases in the library. Loading an archive never fails as a whole (failures
//! are contained per file and per entry), so these errors surface from
//! single-file extraction, filter construction and output writing.
//!
//! Skip reasons for a single HTML container or JSON entry are not errors of
//! this type; see [`ContainerSkip`](crate::parsing::html::ContainerSkip) and
//! [`EntryError`](crate::parsing::json::EntryError).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for postpack operations.
///
/// # Example
///
/// ```rust
/// use postpack::error::Result;
/// use postpack::Post;
///
/// fn my_function() -> Result<Vec<Post>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all postpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file or directory doesn't exist
    /// - Permission denied
    /// - The file is not valid UTF-8 (reported by `read_to_string`)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse an export file.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "HTML", "JSON")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file format doesn't match the expected structure.
    ///
    /// This occurs when:
    /// - A JSON `posts` / `status_updates` key holds something other than an array
    /// - The top-level JSON value is neither an object nor an accepted array
    /// - A configured HTML class marker is not a valid selector
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a filter.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ArchiveError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ArchiveError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates a parse error for a JSON export file.
    pub fn json_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ArchiveError::Parse {
            format: "JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ArchiveError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ArchiveError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Attaches a file path to a parse error that doesn't have one yet.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ArchiveError::Parse {
                format,
                source,
                path: None,
            } => ArchiveError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ArchiveError::Io(_))
    }

    /// Returns `true` if this is an IO "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ArchiveError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ArchiveError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ArchiveError::InvalidDate { .. })
    }
}
