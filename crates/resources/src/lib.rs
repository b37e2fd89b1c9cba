//! GPU resource ownership for the toon sandbox.
//!
//! This crate owns the shared, device-backed resources entities point at:
//! - Meshes (vertex/index buffers with generated tangents)
//! - Materials (shaders, sampler, PBR texture set)
//! - Typed arena pools handing out copyable handles
//! - Primitive demo geometry

mod error;

pub mod material;
pub mod mesh;
pub mod pool;
pub mod primitives;

pub use error::{ResourceError, ResourceResult};
pub use material::{Material, MaterialTextures};
pub use mesh::{Mesh, MeshData, compute_tangents};
pub use pool::{Handle, Pool};

/// Handle to a [`Mesh`] in a `Pool<Mesh>`.
pub type MeshHandle = Handle<Mesh>;

/// Handle to a [`Material`] in a `Pool<Material>`.
pub type MaterialHandle = Handle<Material>;
