//! Scene state for the toon sandbox.
//!
//! This crate provides:
//! - Transforms with a lazily cached world matrix
//! - The first-person camera
//! - Light definitions and the fixed-capacity light set
//! - Entities and the scene that owns them
//! - Control modes and the interactive light rig

mod error;

pub mod camera;
pub mod controls;
pub mod entity;
pub mod light;
pub mod transform;

pub use camera::Camera;
pub use controls::{ControlMode, LightRig};
pub use entity::{Entity, Scene};
pub use error::{SceneError, SceneResult};
pub use light::{Light, LightKind, LightSet, MAX_LIGHTS};
pub use transform::Transform;
