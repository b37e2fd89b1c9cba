//! Main renderer orchestration.
//!
//! This module provides the [`Renderer`] struct that owns the scene and its
//! interactive state and sequences the frame passes on a
//! [`GraphicsDevice`]: shadow map, geometry into the scene targets, sky,
//! outline post-process, overlay and present.

use toon_core::SandboxConfig;
use toon_platform::{EdgeTrigger, InputState, KeyCode};
use toon_rhi::{GraphicsDevice, SamplerDesc, SamplerState, ShaderHandle, Viewport};
use toon_scene::{Camera, ControlMode, LightRig, LightSet, Scene};
use tracing::{debug, info, trace, warn};

use crate::entity_pass::{self, EntityFrame, ToonRamps};
use crate::error::{RendererError, RendererResult};
use crate::frame::FrameStats;
use crate::overlay::{Overlay, OverlayInfo};
use crate::pass_graph::{FrameResource, LoadOp, PassGraph, PassKind, PassRecord};
use crate::post_process::PostProcess;
use crate::shaders;
use crate::shadow::{ShadowMap, ShadowState};
use crate::sky::{SkyAssets, SkyBox};
use crate::targets::SceneTargets;
use crate::ubo::{GpuLight, pack_lights};

/// Keys that make one light the only enabled light, by slot.
const TOGGLE_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

/// Per-frame values shared by the passes.
struct FrameContext {
    targets: SceneTargets,
    lights: Vec<GpuLight>,
    /// Resources written by the passes that have run so far.
    written: Vec<FrameResource>,
    stats: FrameStats,
}

/// Textures and geometry the renderer does not create itself.
#[derive(Debug)]
pub struct RendererAssets {
    pub ramps: ToonRamps,
    pub sky: Option<SkyAssets>,
}

/// Frame orchestrator.
pub struct Renderer {
    config: SandboxConfig,
    scene: Scene,
    camera: Camera,
    lights: LightSet,
    rig: LightRig,
    mode: ControlMode,

    shadow: ShadowState,
    shadow_map: Option<ShadowMap>,
    shadow_shader: ShaderHandle,
    shadows_enabled: bool,

    targets: Option<SceneTargets>,
    clamp_sampler: SamplerState,
    ramps: ToonRamps,
    sky: Option<SkyBox>,
    post_process: PostProcess,
    graph: PassGraph,

    next_mode: EdgeTrigger,
    shadow_toggle: EdgeTrigger,
    frame_index: u64,
    size: (u32, u32),
}

impl Renderer {
    /// Create the renderer and its frame resources.
    ///
    /// Shadow map, scene target and sky failures are logged and leave the
    /// group absent; shader and sampler failures are returned.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        config: SandboxConfig,
        scene: Scene,
        assets: RendererAssets,
    ) -> RendererResult<Self> {
        let (width, height) = device.back_buffer_size();
        info!("Initializing renderer ({}x{})", width, height);

        let camera = Camera::from_config(&config.camera, width as f32 / height.max(1) as f32);
        let rig = LightRig::default();
        let lights = rig.demo_lights()?;
        let shadow = ShadowState::new(&config.shadow, rig.directional_direction);

        let clamp_sampler = device.create_sampler_state(&SamplerDesc::clamp())?;
        let shadow_shader = device.create_shader(&shaders::shadow_vertex())?;

        let shadow_map = match ShadowMap::create(device, &config.shadow) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("Shadow map unavailable, shadows disabled: {}", e);
                None
            }
        };
        let targets = match SceneTargets::create(device, width, height) {
            Ok(targets) => Some(targets),
            Err(e) => {
                warn!("Scene targets unavailable: {}", e);
                None
            }
        };
        let sky = match assets.sky {
            Some(sky_assets) => match SkyBox::new(device, sky_assets) {
                Ok(sky) => Some(sky),
                Err(e) => {
                    warn!("Sky box unavailable: {}", e);
                    None
                }
            },
            None => None,
        };

        let post_process = PostProcess::new(device, &config.post_process, clamp_sampler)?;
        let graph = PassGraph::frame();
        graph.validate()?;

        info!(
            "Renderer ready: {} entities, {} lights, shadows {}",
            scene.entities().len(),
            lights.len(),
            if config.shadow.enabled { "on" } else { "off" }
        );

        Ok(Self {
            shadows_enabled: config.shadow.enabled,
            config,
            scene,
            camera,
            lights,
            rig,
            mode: ControlMode::default(),
            shadow,
            shadow_map,
            shadow_shader,
            targets,
            clamp_sampler,
            ramps: assets.ramps,
            sky,
            post_process,
            graph,
            next_mode: EdgeTrigger::new(),
            shadow_toggle: EdgeTrigger::new(),
            frame_index: 0,
            size: (width, height),
        })
    }

    /// Apply one frame of input.
    ///
    /// Returns `true` when the user asked to quit.
    pub fn update(&mut self, dt: f32, input: &InputState) -> bool {
        self.camera.update(dt, input, self.mode);

        if self.mode != ControlMode::Camera {
            if self.rig.light_control(dt, input, self.mode) {
                self.shadow.set_direction(self.rig.directional_direction);
            }
            self.rig.update_lights(self.mode, &mut self.lights);
        }

        for (slot, key) in TOGGLE_KEYS.into_iter().enumerate() {
            if input.is_key_pressed(key) {
                self.lights.toggle(slot);
            }
        }

        if self.next_mode.update(input.is_key_pressed(KeyCode::Tab)) {
            self.mode = self.mode.next();
            info!("Control mode: {}", self.mode.label());
        }

        if self.shadow_toggle.update(input.is_key_pressed(KeyCode::KeyV)) {
            self.shadows_enabled = !self.shadows_enabled;
            info!(
                "Shadows {}",
                if self.shadows_enabled { "enabled" } else { "disabled" }
            );
        }

        let quit = input.is_key_pressed(KeyCode::Escape);
        if quit {
            info!("Quit requested");
        }
        quit
    }

    /// Record one frame following the pass graph.
    ///
    /// A pass runs when its own resources exist and every resource it reads
    /// was written earlier this frame (or is optional-external). Passes
    /// whose record says [`LoadOp::Clear`] clear their outputs after
    /// binding them.
    ///
    /// # Errors
    ///
    /// Returns [`RendererError::MissingResource`] if the scene targets do
    /// not exist, or any device error from presenting.
    pub fn render_frame(
        &mut self,
        device: &mut dyn GraphicsDevice,
        overlay: &mut dyn Overlay,
    ) -> RendererResult<FrameStats> {
        let targets = self
            .targets
            .ok_or(RendererError::MissingResource("scene render targets"))?;

        let lights = pack_lights(&self.lights);
        let mut frame = FrameContext {
            targets,
            stats: FrameStats {
                frame_index: self.frame_index,
                light_count: lights.len(),
                enabled_lights: self.lights.enabled_count(),
                ..Default::default()
            },
            lights,
            written: Vec::new(),
        };

        let passes = self.graph.passes().to_vec();
        for record in &passes {
            if !self.is_active(record, &frame.written) {
                trace!("Skipping {} pass", record.pass);
                continue;
            }

            device.begin_event(record.pass.label());
            let result = self.run_pass(record, device, overlay, &mut frame);
            device.end_event();
            result?;
            frame.written.extend(record.writes.iter().copied());
            frame.stats.passes.push(record.pass);
        }

        trace!("{}", frame.stats);
        self.frame_index += 1;
        Ok(frame.stats)
    }

    fn is_active(&self, record: &PassRecord, written: &[FrameResource]) -> bool {
        let inputs_ready = record
            .reads
            .iter()
            .all(|read| read.is_optional_external() || written.contains(read));
        if !inputs_ready {
            return false;
        }

        match record.pass {
            PassKind::Shadow => self.shadows_enabled && self.shadow_map.is_some(),
            PassKind::Sky => self.sky.is_some(),
            _ => true,
        }
    }

    fn run_pass(
        &mut self,
        record: &PassRecord,
        device: &mut dyn GraphicsDevice,
        overlay: &mut dyn Overlay,
        frame: &mut FrameContext,
    ) -> RendererResult<()> {
        let targets = frame.targets;
        match record.pass {
            PassKind::Shadow => {
                if let Some(map) = self.shadow_map {
                    map.bind(device);
                    self.clear_outputs(device, record, &targets);
                    frame.stats.shadow_draws =
                        map.render(device, &self.shadow, self.shadow_shader, &mut self.scene)?;
                }
            }
            PassKind::Geometry => {
                self.begin_scene(device, &targets);
                self.clear_outputs(device, record, &targets);
                let entity_frame = EntityFrame {
                    view: self.camera.view_matrix(),
                    projection: self.camera.projection_matrix(),
                    camera_position: self.camera.position(),
                    lights: &frame.lights,
                    shadow_view: self.shadow.view_matrix(),
                    shadow_projection: self.shadow.projection_matrix(),
                    render_shadows: frame.written.contains(&FrameResource::ShadowMap),
                    shadow_map: self.shadow_map.map(|map| map.bindings()),
                    clamp_sampler: self.clamp_sampler,
                    ramps: self.ramps,
                };
                frame.stats.entity_draws =
                    entity_pass::draw_entities(device, &entity_frame, &mut self.scene)?;
            }
            PassKind::Sky => {
                if let Some(sky) = &self.sky {
                    self.clear_outputs(device, record, &targets);
                    sky.draw(
                        device,
                        self.camera.view_matrix(),
                        self.camera.projection_matrix(),
                    );
                    frame.stats.sky_draws = 1;
                }
            }
            PassKind::PostProcess => {
                self.post_process.bind(device);
                self.clear_outputs(device, record, &targets);
                self.post_process.render(device, &targets);
                frame.stats.post_draws = 1;
            }
            PassKind::Overlay => {
                self.clear_outputs(device, record, &targets);
                let info = self.overlay_info();
                overlay.draw(device, &info);
            }
            PassKind::Present => {
                device.present()?;
                // Presenting unbinds the targets
                let back_buffer = device.back_buffer();
                let main_depth = device.main_depth_buffer();
                device.set_render_targets(&[back_buffer], Some(main_depth));
            }
        }
        Ok(())
    }

    /// Clear every resource `record` writes, if its load op says so.
    fn clear_outputs(
        &self,
        device: &mut dyn GraphicsDevice,
        record: &PassRecord,
        targets: &SceneTargets,
    ) {
        if record.load != LoadOp::Clear {
            return;
        }

        let color = self.config.clear_color;
        for resource in &record.writes {
            match resource {
                FrameResource::ShadowMap => {
                    if let Some(map) = &self.shadow_map {
                        device.clear_depth_stencil(map.depth_stencil_view(), 1.0, 0);
                    }
                }
                FrameResource::SceneColor => device.clear_render_target(targets.color.rtv, color),
                FrameResource::SceneNormals => {
                    device.clear_render_target(targets.normals.rtv, color)
                }
                FrameResource::SceneDepth => device.clear_render_target(targets.depth.rtv, color),
                FrameResource::DepthBuffer => {
                    let main_depth = device.main_depth_buffer();
                    device.clear_depth_stencil(main_depth, 1.0, 0);
                }
                FrameResource::BackBuffer => {
                    let back_buffer = device.back_buffer();
                    device.clear_render_target(back_buffer, color);
                }
            }
        }
    }

    /// Bind the multi-target buffer with the main depth buffer.
    fn begin_scene(&self, device: &mut dyn GraphicsDevice, targets: &SceneTargets) {
        let main_depth = device.main_depth_buffer();
        let (width, height) = device.back_buffer_size();

        device.set_render_targets(&targets.render_target_views(), Some(main_depth));
        device.set_viewport(Viewport::full(width, height));
    }

    /// Resize the back buffer, camera projection and scene targets.
    ///
    /// The old scene target views are released before the new ones are
    /// created. Zero sizes (minimized windows) are ignored. If the targets
    /// cannot be recreated they are dropped and frames fail until the next
    /// resize.
    pub fn on_resize(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> RendererResult<()> {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to zero dimensions");
            return Ok(());
        }

        info!(
            "Resizing from {}x{} to {}x{}",
            self.size.0, self.size.1, width, height
        );
        device.resize_back_buffer(width, height)?;
        self.size = (width, height);
        self.camera
            .update_projection_matrix(width as f32 / height as f32);

        if let Some(old) = self.targets.take() {
            old.release(device);
        }
        self.targets = match SceneTargets::create(device, width, height) {
            Ok(targets) => Some(targets),
            Err(e) => {
                warn!("Scene targets unavailable after resize: {}", e);
                None
            }
        };
        Ok(())
    }

    /// Snapshot for the UI overlay.
    pub fn overlay_info(&self) -> OverlayInfo {
        OverlayInfo {
            frame_index: self.frame_index,
            mode: self.mode,
            shadows_enabled: self.shadows_enabled,
            rig: self.rig.clone(),
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightSet {
        &mut self.lights
    }

    pub fn rig(&self) -> &LightRig {
        &self.rig
    }

    pub fn control_mode(&self) -> ControlMode {
        self.mode
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadows_enabled
    }

    pub fn set_shadows_enabled(&mut self, enabled: bool) {
        self.shadows_enabled = enabled;
    }

    pub fn shadow_state(&self) -> &ShadowState {
        &self.shadow
    }

    pub fn shadow_map(&self) -> Option<&ShadowMap> {
        self.shadow_map.as_ref()
    }

    pub fn scene_targets(&self) -> Option<&SceneTargets> {
        self.targets.as_ref()
    }

    pub fn has_sky(&self) -> bool {
        self.sky.is_some()
    }

    pub fn post_process(&self) -> &PostProcess {
        &self.post_process
    }

    pub fn post_process_mut(&mut self) -> &mut PostProcess {
        &mut self.post_process
    }

    pub fn graph(&self) -> &PassGraph {
        &self.graph
    }

    /// Replace the frame's pass list.
    pub fn set_graph(&mut self, graph: PassGraph) -> RendererResult<()> {
        graph.validate()?;
        info!("Pass graph replaced: {:?}", graph.order());
        self.graph = graph;
        Ok(())
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
