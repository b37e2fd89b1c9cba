//! Error types shared by the sandbox crates.

use thiserror::Error;

/// Main error type for the sandbox.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Configuration could not be serialized
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] ron::Error),

    /// Configuration values are out of range
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using the sandbox's Error type.
pub type Result<T> = std::result::Result<T, Error>;
