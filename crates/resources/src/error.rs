//! Error types for resource creation.

use thiserror::Error;
use toon_rhi::RhiError;

/// Error type for resource operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The graphics device refused the upload.
    #[error("Device error: {0}")]
    Rhi(#[from] RhiError),

    /// Mesh data has no vertices or no indices.
    #[error("Mesh '{0}' has no geometry")]
    EmptyMesh(String),

    /// Index count is not a multiple of three.
    #[error("Mesh '{name}' has {count} indices, not a triangle list")]
    NotTriangles {
        /// Mesh debug name.
        name: String,
        /// Offending index count.
        count: usize,
    },

    /// An index points past the vertex array.
    #[error("Mesh '{name}' index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Mesh debug name.
        name: String,
        /// Offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
