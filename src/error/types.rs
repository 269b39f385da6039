//! Custom error types for component document operations

use std::io;
use std::path::Path;
use thiserror::Error;

/// Main error type for vehicle component operations
///
/// Every variant carries a user-presentable message. File and parse
/// failures are absorbed at component boundaries and surface as logged
/// messages plus sentinel return values; `Result`s carrying this type
/// never escape as panics.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ComponentError {
    /// Schema Error - schema resource missing, malformed or uncompilable
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Validation Error - document does not conform to the schema
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Navigation Error - a mutation path does not resolve in the
    /// document's current shape (caller programming error)
    #[error("Navigation error: {message}")]
    Navigation { message: String },

    /// Template Error - template operation could not be carried out
    #[error("Template error: {message}")]
    Template { message: String },

    /// Target directory for a whole-file write does not exist
    #[error("Directory '{path}' not found")]
    DirectoryNotFound { path: String },

    /// Write permission denied on the target file
    #[error("Permission denied when writing to file '{path}'")]
    PermissionDenied { path: String },

    /// Target path names a directory, not a file
    #[error("Path '{path}' is a directory, not a file")]
    PathIsDirectory { path: String },

    /// Serialization failure while encoding the document
    #[error("Error serializing data to JSON: {message}")]
    Serialization { message: String },

    /// Any other OS-level I/O failure
    #[error("OS error when writing to file '{path}': {message}")]
    Io { path: String, message: String },
}

impl ComponentError {
    /// Create a schema error
    #[inline]
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a validation error
    #[inline]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a navigation error
    #[inline]
    pub fn navigation<S: Into<String>>(message: S) -> Self {
        Self::Navigation {
            message: message.into(),
        }
    }

    /// Create a template error
    #[inline]
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create a serialization error
    #[inline]
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Classify an I/O failure from a whole-file write to `path` inside `dir`
    ///
    /// Maps the error kinds the persistence contract distinguishes
    /// (missing directory, permission denied, path is a directory) and
    /// folds everything else into the generic OS variant.
    #[must_use]
    pub fn from_write_error(err: &io::Error, path: &Path, dir: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::DirectoryNotFound {
                path: dir.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::IsADirectory => Self::PathIsDirectory {
                path: path.display().to_string(),
            },
            _ => Self::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            },
        }
    }
}
