//! Render Hardware Interface for the toon sandbox.
//!
//! This crate describes the graphics device the frame pipeline drives,
//! without binding to a particular native API. It handles:
//! - Opaque resource handles (textures, views, states, buffers, shaders)
//! - Resource descriptors (textures, samplers, rasterizer and depth states)
//! - The [`GraphicsDevice`] command stream and the named-parameter [`ShaderBinder`]
//! - An in-memory [`RecordingDevice`] that logs every command

mod error;

pub mod buffer;
pub mod device;
pub mod handle;
pub mod pipeline;
pub mod recording;
pub mod sampler;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use buffer::BufferUsage;
pub use device::{GraphicsDevice, ShaderBinder, Viewport};
pub use error::{RhiError, RhiResult};
pub use handle::{
    BufferHandle, DepthStencilState, DepthStencilView, RasterizerState, RenderTargetView,
    SamplerState, ShaderHandle, ShaderResourceView, TextureHandle,
};
pub use pipeline::{ComparisonFunc, CullMode, DepthStencilDesc, RasterizerDesc};
pub use recording::{Command, ParameterValue, RecordingDevice, ResourceKind, count_draws};
pub use sampler::{AddressMode, Filter, SamplerDesc};
pub use shader::{ShaderDesc, ShaderStage};
pub use texture::{Format, TextureDesc, TextureUsage};
pub use vertex::{Vertex, VertexElement};
