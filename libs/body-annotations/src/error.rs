//! # Annotation Errors
//!
//! Error types for bookmark documents, store access, and background loads.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type AnnotationResult<T> = Result<T, AnnotationError>;

/// Errors that can occur while reading or importing body annotations.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// Bookmark file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Document lacks a `data` or `metadata` section
    #[error("Bookmark document is missing 'data' or 'metadata'")]
    MissingSection,

    /// Document lacks `metadata.description`
    #[error("Bookmark document is missing 'metadata/description'")]
    MissingDescription,

    /// Document describes something other than bookmarks
    #[error("Bookmark document has description '{found}', expected '{expected}'")]
    WrongDescription {
        /// Description found in the document
        found: String,
        /// Description that was required
        expected: &'static str,
    },

    /// The `data` section is not an array
    #[error("Bookmark document 'data' section is not an array")]
    DataNotArray,

    /// An entry of the `data` array does not describe a bookmark
    #[error("Invalid bookmark at index {index}: {source}")]
    InvalidRecord {
        /// Position in the `data` array
        index: usize,
        /// Deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Store has no data instance with this name
    #[error("Store has no data instance '{0}'")]
    MissingData(String),

    /// Store has no value under this key
    #[error("Store has no key '{key}' in '{data}'")]
    MissingKey {
        /// Data instance that was searched
        data: String,
        /// Key that was requested
        key: String,
    },

    /// Store backend failure
    #[error("Store error: {0}")]
    Store(String),

    /// Background load was cancelled before it finished
    #[error("Load cancelled")]
    Cancelled,

    /// Background load panicked
    #[error("Load panicked: {0}")]
    JobPanicked(String),
}

impl AnnotationError {
    /// Creates a store backend error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates a missing key error.
    pub fn missing_key(data: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            data: data.into(),
            key: key.into(),
        }
    }
}
