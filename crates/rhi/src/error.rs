//! RHI-specific error types.

use thiserror::Error;

/// RHI-specific error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RhiError {
    /// The device refused to create a resource
    #[error("Failed to create {kind}: {reason}")]
    ResourceCreation {
        /// Kind of resource that failed
        kind: &'static str,
        /// Device-provided reason
        reason: String,
    },

    /// A handle does not name a live resource
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// Descriptor values the device cannot honor
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Swap chain operation failed
    #[error("Swap chain error: {0}")]
    SwapChain(String),
}

/// Result type alias for RHI operations.
pub type RhiResult<T> = std::result::Result<T, RhiError>;
