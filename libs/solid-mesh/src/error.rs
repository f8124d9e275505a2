//! # Mesh Errors
//!
//! Error types shared by the builders, the boolean engine and text layout.

use thiserror::Error;

/// Errors that can occur while building or combining meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Non-positive radius/height, zero segment counts, empty vertex lists.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A trigonometric argument left its domain during text layout.
    #[error("Layout overflow: {message}")]
    LayoutOverflow { message: String },

    /// The boolean engine or glyph renderer reported a failure.
    #[error("{collaborator} failed: {message}")]
    CollaboratorFailure {
        collaborator: String,
        message: String,
    },

    /// A generated face references a vertex that does not exist.
    #[error("Face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    DegenerateSeam {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl MeshError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a layout overflow error.
    pub fn layout_overflow(message: impl Into<String>) -> Self {
        Self::LayoutOverflow {
            message: message.into(),
        }
    }

    /// Creates a collaborator failure error.
    pub fn collaborator(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }

    /// Creates a degenerate seam error.
    pub fn degenerate_seam(face: usize, index: u32, vertex_count: usize) -> Self {
        Self::DegenerateSeam {
            face,
            index,
            vertex_count,
        }
    }
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
