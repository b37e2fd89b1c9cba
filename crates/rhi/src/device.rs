//! Graphics device abstraction.
//!
//! [`GraphicsDevice`] is the single command stream the frame pipeline
//! drives. It is used from one thread in strict program order; there is no
//! deferred or parallel recording.

use glam::{Mat4, Vec3, Vec4};

use crate::buffer::BufferUsage;
use crate::error::RhiResult;
use crate::handle::{
    BufferHandle, DepthStencilState, DepthStencilView, RasterizerState, RenderTargetView,
    SamplerState, ShaderHandle, ShaderResourceView, TextureHandle,
};
use crate::pipeline::{DepthStencilDesc, RasterizerDesc};
use crate::sampler::SamplerDesc;
use crate::shader::{ShaderDesc, ShaderStage};
use crate::texture::{Format, TextureDesc};

/// Viewport rectangle and depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a `width x height` target with depth range 0..1.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Named shader parameter binding.
///
/// Values are staged per shader and uploaded by [`copy_all_buffer_data`].
/// Setting a name the shader does not declare does nothing.
///
/// [`copy_all_buffer_data`]: ShaderBinder::copy_all_buffer_data
pub trait ShaderBinder {
    fn set_matrix4x4(&mut self, shader: ShaderHandle, name: &str, value: Mat4);
    fn set_float(&mut self, shader: ShaderHandle, name: &str, value: f32);
    fn set_float3(&mut self, shader: ShaderHandle, name: &str, value: Vec3);
    fn set_float4(&mut self, shader: ShaderHandle, name: &str, value: Vec4);
    fn set_int(&mut self, shader: ShaderHandle, name: &str, value: i32);

    /// Copy raw bytes into a constant (arrays of structs).
    fn set_data(&mut self, shader: ShaderHandle, name: &str, data: &[u8]);

    /// Bind or unbind a texture slot.
    fn set_shader_resource_view(
        &mut self,
        shader: ShaderHandle,
        name: &str,
        view: Option<ShaderResourceView>,
    );

    fn set_sampler_state(&mut self, shader: ShaderHandle, name: &str, sampler: SamplerState);

    /// Upload every staged constant of `shader` to the GPU.
    fn copy_all_buffer_data(&mut self, shader: ShaderHandle);
}

/// Graphics device: resource creation, swap chain and command stream.
pub trait GraphicsDevice: ShaderBinder {
    // ---- Resource creation ----

    fn create_texture(&mut self, desc: &TextureDesc) -> RhiResult<TextureHandle>;

    fn create_render_target_view(&mut self, texture: TextureHandle)
    -> RhiResult<RenderTargetView>;

    /// Depth view of `texture` interpreted as `format`.
    fn create_depth_stencil_view(
        &mut self,
        texture: TextureHandle,
        format: Format,
    ) -> RhiResult<DepthStencilView>;

    /// Shader view of `texture` interpreted as `format`.
    fn create_shader_resource_view(
        &mut self,
        texture: TextureHandle,
        format: Format,
    ) -> RhiResult<ShaderResourceView>;

    /// Drop the texture reference. Views created from it stay valid.
    fn release_texture(&mut self, texture: TextureHandle);

    /// Release a view from [`create_render_target_view`].
    ///
    /// [`create_render_target_view`]: GraphicsDevice::create_render_target_view
    fn release_render_target_view(&mut self, view: RenderTargetView);

    /// Release a view from [`create_shader_resource_view`].
    ///
    /// [`create_shader_resource_view`]: GraphicsDevice::create_shader_resource_view
    fn release_shader_resource_view(&mut self, view: ShaderResourceView);

    fn create_rasterizer_state(&mut self, desc: &RasterizerDesc) -> RhiResult<RasterizerState>;

    fn create_depth_stencil_state(
        &mut self,
        desc: &DepthStencilDesc,
    ) -> RhiResult<DepthStencilState>;

    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> RhiResult<SamplerState>;

    fn create_buffer(&mut self, usage: BufferUsage, data: &[u8]) -> RhiResult<BufferHandle>;

    fn create_shader(&mut self, desc: &ShaderDesc) -> RhiResult<ShaderHandle>;

    // ---- Swap chain ----

    fn back_buffer(&self) -> RenderTargetView;

    fn main_depth_buffer(&self) -> DepthStencilView;

    fn back_buffer_size(&self) -> (u32, u32);

    /// Resize the back buffer and main depth buffer. Previously returned
    /// back-buffer views may be replaced.
    fn resize_back_buffer(&mut self, width: u32, height: u32) -> RhiResult<()>;

    /// Present the back buffer. Presenting may unbind the current targets.
    fn present(&mut self) -> RhiResult<()>;

    // ---- Commands ----

    fn set_render_targets(&mut self, colors: &[RenderTargetView], depth: Option<DepthStencilView>);

    fn clear_render_target(&mut self, target: RenderTargetView, color: [f32; 4]);

    fn clear_depth_stencil(&mut self, target: DepthStencilView, depth: f32, stencil: u8);

    fn set_viewport(&mut self, viewport: Viewport);

    /// `None` restores the default state.
    fn set_rasterizer_state(&mut self, state: Option<RasterizerState>);

    /// `None` restores the default state.
    fn set_depth_stencil_state(&mut self, state: Option<DepthStencilState>);

    /// Bind a shader to the stage it was created for.
    fn set_shader(&mut self, shader: ShaderHandle);

    /// Leave a stage without a shader (depth-only rendering).
    fn clear_shader(&mut self, stage: ShaderStage);

    fn set_vertex_buffer(&mut self, buffer: Option<BufferHandle>, stride: u32);

    fn set_index_buffer(&mut self, buffer: Option<BufferHandle>);

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32);

    fn draw(&mut self, vertex_count: u32, first_vertex: u32);

    /// Unbind the first `count` pixel-stage texture slots.
    fn unbind_pixel_shader_resources(&mut self, count: u32);

    /// Open a named debug region.
    fn begin_event(&mut self, label: &str);

    /// Close the innermost debug region.
    fn end_event(&mut self);
}
