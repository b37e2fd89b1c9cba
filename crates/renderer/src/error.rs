//! Renderer error types.

use thiserror::Error;
use toon_resources::ResourceError;
use toon_rhi::RhiError;
use toon_scene::SceneError;

/// Error type for frame rendering.
#[derive(Error, Debug)]
pub enum RendererError {
    /// Device call failed.
    #[error("RHI error: {0}")]
    Rhi(#[from] RhiError),

    /// Mesh or material setup failed.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The scene refers to something it does not own.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A resource group the frame needs was never created.
    #[error("Missing resource: {0}")]
    MissingResource(&'static str),

    /// The pass order reads a resource before any pass writes it.
    #[error("Invalid pass graph: {0}")]
    InvalidPassGraph(String),
}

/// Result type alias for renderer operations.
pub type RendererResult<T> = Result<T, RendererError>;
