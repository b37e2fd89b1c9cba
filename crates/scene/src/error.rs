//! Scene error types.

use thiserror::Error;

/// Error type for scene assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The light set already holds its maximum number of lights.
    #[error("Light set is full ({capacity} lights)")]
    LightSetFull {
        /// Fixed capacity of the set.
        capacity: usize,
    },

    /// A handle does not belong to the scene's pools.
    #[error("Unknown {kind} handle {index}")]
    UnknownHandle {
        /// "mesh" or "material"
        kind: &'static str,
        /// Index carried by the handle.
        index: usize,
    },
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
