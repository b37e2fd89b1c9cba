//! In-memory graphics device.
//!
//! [`RecordingDevice`] validates handles, tracks created resources and
//! appends every command to a log instead of talking to a GPU. It backs
//! the test suites and the headless demo.

use std::collections::HashMap;

use glam::{Mat4, Vec3, Vec4};

use crate::buffer::BufferUsage;
use crate::device::{GraphicsDevice, ShaderBinder, Viewport};
use crate::error::{RhiError, RhiResult};
use crate::handle::{
    BufferHandle, DepthStencilState, DepthStencilView, RasterizerState, RenderTargetView,
    SamplerState, ShaderHandle, ShaderResourceView, TextureHandle,
};
use crate::pipeline::{DepthStencilDesc, RasterizerDesc};
use crate::sampler::SamplerDesc;
use crate::shader::{ShaderDesc, ShaderStage};
use crate::texture::{Format, TextureDesc};

/// Resource categories for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    View,
    RasterizerState,
    DepthStencilState,
    Sampler,
    Buffer,
    Shader,
    SwapChain,
}

impl ResourceKind {
    fn name(self) -> &'static str {
        match self {
            ResourceKind::Texture => "texture",
            ResourceKind::View => "view",
            ResourceKind::RasterizerState => "rasterizer state",
            ResourceKind::DepthStencilState => "depth-stencil state",
            ResourceKind::Sampler => "sampler state",
            ResourceKind::Buffer => "buffer",
            ResourceKind::Shader => "shader",
            ResourceKind::SwapChain => "swap chain",
        }
    }
}

/// A staged shader parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Matrix(Mat4),
    Float(f32),
    Float3(Vec3),
    Float4(Vec4),
    Int(i32),
    Data(Vec<u8>),
    ShaderResource(Option<ShaderResourceView>),
    Sampler(SamplerState),
}

/// One recorded device command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetRenderTargets {
        colors: Vec<RenderTargetView>,
        depth: Option<DepthStencilView>,
    },
    ClearRenderTarget {
        target: RenderTargetView,
        color: [f32; 4],
    },
    ClearDepthStencil {
        target: DepthStencilView,
        depth: f32,
        stencil: u8,
    },
    SetViewport(Viewport),
    SetRasterizerState(Option<RasterizerState>),
    SetDepthStencilState(Option<DepthStencilState>),
    SetShader(ShaderHandle),
    ClearShader(ShaderStage),
    SetParameter {
        shader: ShaderHandle,
        name: String,
        value: ParameterValue,
    },
    CopyAllBufferData(ShaderHandle),
    SetVertexBuffer {
        buffer: Option<BufferHandle>,
        stride: u32,
    },
    SetIndexBuffer(Option<BufferHandle>),
    DrawIndexed {
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
    Draw {
        vertex_count: u32,
        first_vertex: u32,
    },
    UnbindPixelShaderResources(u32),
    BeginEvent(String),
    EndEvent,
    Present,
}

impl Command {
    /// Whether this command submits geometry.
    pub fn is_draw(&self) -> bool {
        matches!(self, Command::Draw { .. } | Command::DrawIndexed { .. })
    }
}

/// Count draw commands in a slice of the log.
pub fn count_draws(commands: &[Command]) -> usize {
    commands.iter().filter(|c| c.is_draw()).count()
}

#[derive(Debug, Clone, Copy)]
struct FailurePoint {
    kind: ResourceKind,
    successes_left: usize,
}

/// Graphics device that records commands in memory.
#[derive(Debug)]
pub struct RecordingDevice {
    next_id: u32,
    commands: Vec<Command>,

    textures: HashMap<TextureHandle, TextureDesc>,
    shaders: HashMap<ShaderHandle, ShaderDesc>,
    buffers: HashMap<BufferHandle, (BufferUsage, usize)>,
    rasterizer_states: HashMap<RasterizerState, RasterizerDesc>,
    depth_stencil_states: HashMap<DepthStencilState, DepthStencilDesc>,
    samplers: HashMap<SamplerState, SamplerDesc>,
    render_target_views: HashMap<RenderTargetView, TextureHandle>,
    shader_resource_views: HashMap<ShaderResourceView, TextureHandle>,
    parameters: HashMap<(ShaderHandle, String), ParameterValue>,

    back_buffer: RenderTargetView,
    main_depth: DepthStencilView,
    size: (u32, u32),

    bound_colors: Vec<RenderTargetView>,
    bound_depth: Option<DepthStencilView>,
    open_events: usize,
    present_count: u32,
    failures: Vec<FailurePoint>,
}

impl RecordingDevice {
    /// Create a device with a `width x height` back buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let mut device = Self {
            next_id: 1,
            commands: Vec::new(),
            textures: HashMap::new(),
            shaders: HashMap::new(),
            buffers: HashMap::new(),
            rasterizer_states: HashMap::new(),
            depth_stencil_states: HashMap::new(),
            samplers: HashMap::new(),
            render_target_views: HashMap::new(),
            shader_resource_views: HashMap::new(),
            parameters: HashMap::new(),
            back_buffer: RenderTargetView::from_raw(0),
            main_depth: DepthStencilView::from_raw(0),
            size: (width, height),
            bound_colors: Vec::new(),
            bound_depth: None,
            open_events: 0,
            present_count: 0,
            failures: Vec::new(),
        };
        device.reissue_swap_chain_views();
        tracing::debug!("Recording device created ({}x{})", width, height);
        device
    }

    fn next_raw(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn reissue_swap_chain_views(&mut self) {
        self.back_buffer = RenderTargetView::from_raw(self.next_raw());
        self.main_depth = DepthStencilView::from_raw(self.next_raw());
    }

    /// Make a future creation of `kind` fail once, after `successes`
    /// further creations of that kind have succeeded.
    pub fn fail_after(&mut self, kind: ResourceKind, successes: usize) {
        self.failures.push(FailurePoint {
            kind,
            successes_left: successes,
        });
    }

    fn check_failure(&mut self, kind: ResourceKind) -> RhiResult<()> {
        let Some(index) = self.failures.iter().position(|f| f.kind == kind) else {
            return Ok(());
        };

        let point = &mut self.failures[index];
        if point.successes_left == 0 {
            self.failures.remove(index);
            tracing::debug!("Injected {} creation failure", kind.name());
            return Err(RhiError::ResourceCreation {
                kind: kind.name(),
                reason: "injected failure".to_string(),
            });
        }
        point.successes_left -= 1;
        Ok(())
    }

    fn texture_desc_checked(&self, texture: TextureHandle) -> RhiResult<TextureDesc> {
        self.textures
            .get(&texture)
            .copied()
            .ok_or_else(|| RhiError::InvalidHandle(format!("{texture:?}")))
    }

    fn stage_parameter(&mut self, shader: ShaderHandle, name: &str, value: ParameterValue) {
        let declared = self
            .shaders
            .get(&shader)
            .is_some_and(|desc| desc.declares(name));
        if !declared {
            tracing::trace!("Ignoring undeclared parameter '{}' on {:?}", name, shader);
            return;
        }

        self.parameters
            .insert((shader, name.to_string()), value.clone());
        self.commands.push(Command::SetParameter {
            shader,
            name: name.to_string(),
            value,
        });
    }

    // ---- Queries ----

    /// Every command recorded since creation or the last take.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Commands inside each top-level `label` debug region, in order.
    pub fn event_scopes(&self, label: &str) -> Vec<&[Command]> {
        let mut scopes = Vec::new();
        let mut index = 0;
        while index < self.commands.len() {
            if let Command::BeginEvent(name) = &self.commands[index]
                && name == label
            {
                let start = index + 1;
                let mut depth = 1usize;
                let mut end = start;
                while end < self.commands.len() {
                    match &self.commands[end] {
                        Command::BeginEvent(_) => depth += 1,
                        Command::EndEvent => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    end += 1;
                }
                scopes.push(&self.commands[start..end]);
                index = end;
            }
            index += 1;
        }
        scopes
    }

    /// Latest staged value of a shader parameter.
    pub fn parameter(&self, shader: ShaderHandle, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(&(shader, name.to_string()))
    }

    pub fn shader_desc(&self, shader: ShaderHandle) -> Option<&ShaderDesc> {
        self.shaders.get(&shader)
    }

    pub fn texture_desc(&self, texture: TextureHandle) -> Option<&TextureDesc> {
        self.textures.get(&texture)
    }

    pub fn rasterizer_desc(&self, state: RasterizerState) -> Option<&RasterizerDesc> {
        self.rasterizer_states.get(&state)
    }

    pub fn depth_stencil_desc(&self, state: DepthStencilState) -> Option<&DepthStencilDesc> {
        self.depth_stencil_states.get(&state)
    }

    pub fn sampler_desc(&self, sampler: SamplerState) -> Option<&SamplerDesc> {
        self.samplers.get(&sampler)
    }

    /// Usage and byte length of a buffer.
    pub fn buffer_info(&self, buffer: BufferHandle) -> Option<(BufferUsage, usize)> {
        self.buffers.get(&buffer).copied()
    }

    /// Number of textures not yet released.
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of render-target and shader-resource views not yet released.
    ///
    /// Swap-chain views are owned by the device and not counted.
    pub fn live_view_count(&self) -> usize {
        self.render_target_views.len() + self.shader_resource_views.len()
    }

    pub fn bound_render_targets(&self) -> &[RenderTargetView] {
        &self.bound_colors
    }

    pub fn bound_depth_stencil(&self) -> Option<DepthStencilView> {
        self.bound_depth
    }

    pub fn present_count(&self) -> u32 {
        self.present_count
    }
}

impl ShaderBinder for RecordingDevice {
    fn set_matrix4x4(&mut self, shader: ShaderHandle, name: &str, value: Mat4) {
        self.stage_parameter(shader, name, ParameterValue::Matrix(value));
    }

    fn set_float(&mut self, shader: ShaderHandle, name: &str, value: f32) {
        self.stage_parameter(shader, name, ParameterValue::Float(value));
    }

    fn set_float3(&mut self, shader: ShaderHandle, name: &str, value: Vec3) {
        self.stage_parameter(shader, name, ParameterValue::Float3(value));
    }

    fn set_float4(&mut self, shader: ShaderHandle, name: &str, value: Vec4) {
        self.stage_parameter(shader, name, ParameterValue::Float4(value));
    }

    fn set_int(&mut self, shader: ShaderHandle, name: &str, value: i32) {
        self.stage_parameter(shader, name, ParameterValue::Int(value));
    }

    fn set_data(&mut self, shader: ShaderHandle, name: &str, data: &[u8]) {
        self.stage_parameter(shader, name, ParameterValue::Data(data.to_vec()));
    }

    fn set_shader_resource_view(
        &mut self,
        shader: ShaderHandle,
        name: &str,
        view: Option<ShaderResourceView>,
    ) {
        self.stage_parameter(shader, name, ParameterValue::ShaderResource(view));
    }

    fn set_sampler_state(&mut self, shader: ShaderHandle, name: &str, sampler: SamplerState) {
        self.stage_parameter(shader, name, ParameterValue::Sampler(sampler));
    }

    fn copy_all_buffer_data(&mut self, shader: ShaderHandle) {
        self.commands.push(Command::CopyAllBufferData(shader));
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> RhiResult<TextureHandle> {
        self.check_failure(ResourceKind::Texture)?;
        if desc.width == 0 || desc.height == 0 || desc.array_size == 0 {
            return Err(RhiError::InvalidDescriptor(format!(
                "texture extent {}x{}x{}",
                desc.width, desc.height, desc.array_size
            )));
        }

        let handle = TextureHandle::from_raw(self.next_raw());
        self.textures.insert(handle, *desc);
        tracing::trace!("Created texture {:?}: {:?}", handle, desc);
        Ok(handle)
    }

    fn create_render_target_view(
        &mut self,
        texture: TextureHandle,
    ) -> RhiResult<RenderTargetView> {
        let desc = self.texture_desc_checked(texture)?;
        if !desc.usage.render_target {
            return Err(RhiError::InvalidDescriptor(
                "texture is not a render target".to_string(),
            ));
        }
        self.check_failure(ResourceKind::View)?;
        let view = RenderTargetView::from_raw(self.next_raw());
        self.render_target_views.insert(view, texture);
        Ok(view)
    }

    fn create_depth_stencil_view(
        &mut self,
        texture: TextureHandle,
        format: Format,
    ) -> RhiResult<DepthStencilView> {
        let desc = self.texture_desc_checked(texture)?;
        if !desc.usage.depth_stencil || !format.is_depth() {
            return Err(RhiError::InvalidDescriptor(format!(
                "cannot view {:?} as depth {:?}",
                desc.format, format
            )));
        }
        self.check_failure(ResourceKind::View)?;
        Ok(DepthStencilView::from_raw(self.next_raw()))
    }

    fn create_shader_resource_view(
        &mut self,
        texture: TextureHandle,
        _format: Format,
    ) -> RhiResult<ShaderResourceView> {
        let desc = self.texture_desc_checked(texture)?;
        if !desc.usage.shader_resource {
            return Err(RhiError::InvalidDescriptor(
                "texture is not sampleable".to_string(),
            ));
        }
        self.check_failure(ResourceKind::View)?;
        let view = ShaderResourceView::from_raw(self.next_raw());
        self.shader_resource_views.insert(view, texture);
        Ok(view)
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(&texture).is_none() {
            tracing::warn!("Releasing unknown texture {:?}", texture);
        }
    }

    fn release_render_target_view(&mut self, view: RenderTargetView) {
        if self.render_target_views.remove(&view).is_none() {
            tracing::warn!("Releasing unknown render target view {:?}", view);
        }
    }

    fn release_shader_resource_view(&mut self, view: ShaderResourceView) {
        if self.shader_resource_views.remove(&view).is_none() {
            tracing::warn!("Releasing unknown shader resource view {:?}", view);
        }
    }

    fn create_rasterizer_state(&mut self, desc: &RasterizerDesc) -> RhiResult<RasterizerState> {
        self.check_failure(ResourceKind::RasterizerState)?;
        let state = RasterizerState::from_raw(self.next_raw());
        self.rasterizer_states.insert(state, *desc);
        Ok(state)
    }

    fn create_depth_stencil_state(
        &mut self,
        desc: &DepthStencilDesc,
    ) -> RhiResult<DepthStencilState> {
        self.check_failure(ResourceKind::DepthStencilState)?;
        let state = DepthStencilState::from_raw(self.next_raw());
        self.depth_stencil_states.insert(state, *desc);
        Ok(state)
    }

    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> RhiResult<SamplerState> {
        self.check_failure(ResourceKind::Sampler)?;
        let sampler = SamplerState::from_raw(self.next_raw());
        self.samplers.insert(sampler, *desc);
        Ok(sampler)
    }

    fn create_buffer(&mut self, usage: BufferUsage, data: &[u8]) -> RhiResult<BufferHandle> {
        self.check_failure(ResourceKind::Buffer)?;
        if data.is_empty() {
            return Err(RhiError::InvalidDescriptor(format!(
                "empty {usage:?} buffer"
            )));
        }
        let buffer = BufferHandle::from_raw(self.next_raw());
        self.buffers.insert(buffer, (usage, data.len()));
        Ok(buffer)
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> RhiResult<ShaderHandle> {
        self.check_failure(ResourceKind::Shader)?;
        let shader = ShaderHandle::from_raw(self.next_raw());
        self.shaders.insert(shader, desc.clone());
        tracing::trace!("Created {:?} shader '{}'", desc.stage, desc.name);
        Ok(shader)
    }

    fn back_buffer(&self) -> RenderTargetView {
        self.back_buffer
    }

    fn main_depth_buffer(&self) -> DepthStencilView {
        self.main_depth
    }

    fn back_buffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn resize_back_buffer(&mut self, width: u32, height: u32) -> RhiResult<()> {
        if width == 0 || height == 0 {
            return Err(RhiError::SwapChain(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        self.check_failure(ResourceKind::SwapChain)?;

        self.size = (width, height);
        self.bound_colors.clear();
        self.bound_depth = None;
        self.reissue_swap_chain_views();
        tracing::debug!("Back buffer resized to {}x{}", width, height);
        Ok(())
    }

    fn present(&mut self) -> RhiResult<()> {
        self.check_failure(ResourceKind::SwapChain)?;
        self.commands.push(Command::Present);
        self.present_count += 1;
        self.bound_colors.clear();
        self.bound_depth = None;
        Ok(())
    }

    fn set_render_targets(&mut self, colors: &[RenderTargetView], depth: Option<DepthStencilView>) {
        self.bound_colors = colors.to_vec();
        self.bound_depth = depth;
        self.commands.push(Command::SetRenderTargets {
            colors: colors.to_vec(),
            depth,
        });
    }

    fn clear_render_target(&mut self, target: RenderTargetView, color: [f32; 4]) {
        self.commands
            .push(Command::ClearRenderTarget { target, color });
    }

    fn clear_depth_stencil(&mut self, target: DepthStencilView, depth: f32, stencil: u8) {
        self.commands.push(Command::ClearDepthStencil {
            target,
            depth,
            stencil,
        });
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.commands.push(Command::SetViewport(viewport));
    }

    fn set_rasterizer_state(&mut self, state: Option<RasterizerState>) {
        self.commands.push(Command::SetRasterizerState(state));
    }

    fn set_depth_stencil_state(&mut self, state: Option<DepthStencilState>) {
        self.commands.push(Command::SetDepthStencilState(state));
    }

    fn set_shader(&mut self, shader: ShaderHandle) {
        self.commands.push(Command::SetShader(shader));
    }

    fn clear_shader(&mut self, stage: ShaderStage) {
        self.commands.push(Command::ClearShader(stage));
    }

    fn set_vertex_buffer(&mut self, buffer: Option<BufferHandle>, stride: u32) {
        self.commands
            .push(Command::SetVertexBuffer { buffer, stride });
    }

    fn set_index_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.commands.push(Command::SetIndexBuffer(buffer));
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) {
        self.commands.push(Command::DrawIndexed {
            index_count,
            first_index,
            base_vertex,
        });
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) {
        self.commands.push(Command::Draw {
            vertex_count,
            first_vertex,
        });
    }

    fn unbind_pixel_shader_resources(&mut self, count: u32) {
        self.commands.push(Command::UnbindPixelShaderResources(count));
    }

    fn begin_event(&mut self, label: &str) {
        self.open_events += 1;
        self.commands.push(Command::BeginEvent(label.to_string()));
    }

    fn end_event(&mut self) {
        if self.open_events == 0 {
            tracing::warn!("end_event without matching begin_event");
            return;
        }
        self.open_events -= 1;
        self.commands.push(Command::EndEvent);
    }
}
