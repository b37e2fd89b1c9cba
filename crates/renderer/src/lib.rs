//! Frame pipeline for the toon sandbox.
//!
//! This crate orchestrates the rendering process:
//! - Directional-light shadow map pass
//! - Toon-lit entity pass into color, normal and depth targets
//! - Sky box and outline post-process
//! - Pass ordering and the per-frame orchestrator

pub mod entity_pass;
mod error;
pub mod frame;
pub mod overlay;
pub mod pass_graph;
pub mod post_process;
pub mod renderer;
pub mod shaders;
pub mod shadow;
pub mod sky;
pub mod targets;
pub mod ubo;

pub use entity_pass::{EntityFrame, ToonRamps, draw_entities};
pub use error::{RendererError, RendererResult};
pub use frame::FrameStats;
pub use overlay::{NullOverlay, Overlay, OverlayInfo};
pub use pass_graph::{FrameResource, LoadOp, PassGraph, PassKind, PassRecord};
pub use post_process::PostProcess;
pub use renderer::{Renderer, RendererAssets};
pub use shadow::{ShadowBindings, ShadowMap, ShadowState, shadow_projection, shadow_view};
pub use sky::{SkyAssets, SkyBox};
pub use targets::{RenderTarget, SceneTargets};
pub use ubo::{GpuLight, pack_lights};
