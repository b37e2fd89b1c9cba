//! Core utilities for the toon sandbox.
//!
//! This crate provides foundational types and utilities used across the workspace:
//! - Error types and result aliases
//! - Logging initialization
//! - Frame timing
//! - Configuration management

pub mod config;
mod error;
mod logging;
mod timer;

pub use config::SandboxConfig;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use timer::{FrameTime, Timer};
