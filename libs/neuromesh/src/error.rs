//! # Mesh Errors
//!
//! Error types for mesh construction and geometry operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or processing meshes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Degenerate parameters or geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the problem
        message: String,
    },

    /// Boolean operation failed
    #[error("Boolean operation failed: {message}")]
    BooleanFailed {
        /// Description of the problem
        message: String,
    },

    /// Per-vertex attribute is neither empty nor as long as the vertex list
    #[error("Attribute `{attribute}` has {len} entries, expected 0 or {expected}")]
    AttributeLength {
        /// Attribute name
        attribute: &'static str,
        /// Actual length
        len: usize,
        /// Vertex count
        expected: usize,
    },

    /// Index buffer references a vertex that does not exist
    #[error("Index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Position in the index buffer
        position: usize,
        /// Vertex count
        vertex_count: usize,
    },

    /// Inputs that must pair up have different lengths
    #[error("Length mismatch: {message}")]
    LengthMismatch {
        /// Description of the problem
        message: String,
    },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(message: impl Into<String>) -> Self {
        Self::LengthMismatch {
            message: message.into(),
        }
    }
}
