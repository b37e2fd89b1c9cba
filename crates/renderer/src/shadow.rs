//! Directional-light shadow mapping.
//!
//! [`ShadowState`] holds the light-space matrices: an orthographic
//! projection fixed at startup and a view that is rebuilt only when the
//! directional light changes direction. [`ShadowMap`] owns the depth
//! texture views and states of the depth-only pass.

use glam::{Mat4, Vec3};
use toon_core::config::ShadowConfig;
use toon_rhi::{
    DepthStencilView, Format, GraphicsDevice, RasterizerDesc, RasterizerState, RhiResult,
    SamplerDesc, SamplerState, ShaderHandle, ShaderResourceView, ShaderStage, TextureDesc,
    Vertex, Viewport,
};
use toon_scene::{Scene, SceneError};
use tracing::{debug, trace, warn};

use crate::error::RendererResult;
use crate::shaders;

/// Light-space view looking along `direction` from `back_off` units behind
/// the origin.
///
/// Up is +Y, or +Z when `direction` is (anti)parallel to +Y. A direction
/// too short to normalize looks straight down.
pub fn shadow_view(direction: Vec3, back_off: f32) -> Mat4 {
    let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
    let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    Mat4::look_to_lh(-direction * back_off, direction, up)
}

/// Orthographic light box, `projection_extent` units wide and high.
pub fn shadow_projection(config: &ShadowConfig) -> Mat4 {
    let half = config.projection_extent * 0.5;
    Mat4::orthographic_lh(-half, half, -half, half, config.near, config.far)
}

fn is_usable_direction(direction: Vec3) -> bool {
    direction.is_finite() && direction.length_squared() >= f32::EPSILON
}

/// Light-space matrices for the directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowState {
    direction: Vec3,
    back_off: f32,
    view: Mat4,
    projection: Mat4,
}

impl ShadowState {
    pub fn new(config: &ShadowConfig, direction: Vec3) -> Self {
        let direction = if is_usable_direction(direction) {
            direction
        } else {
            warn!("Zero shadow direction, falling back to straight down");
            Vec3::NEG_Y
        };

        Self {
            direction,
            back_off: config.back_off,
            view: shadow_view(direction, config.back_off),
            projection: shadow_projection(config),
        }
    }

    /// Follow a new light direction.
    ///
    /// Returns `true` if the view was rebuilt. An unchanged or (near) zero
    /// direction keeps the current view.
    pub fn set_direction(&mut self, direction: Vec3) -> bool {
        if direction == self.direction {
            return false;
        }
        if !is_usable_direction(direction) {
            debug!("Ignoring degenerate shadow direction {:?}", direction);
            return false;
        }

        self.direction = direction;
        self.view = shadow_view(direction, self.back_off);
        trace!("Shadow view rebuilt for direction {:?}", direction);
        true
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }
}

/// Views the entity pass samples the shadow map through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowBindings {
    pub srv: ShaderResourceView,
    pub sampler: SamplerState,
}

/// Shadow map texture views plus the biased rasterizer and comparison
/// sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowMap {
    size: u32,
    dsv: DepthStencilView,
    srv: ShaderResourceView,
    rasterizer: RasterizerState,
    sampler: SamplerState,
}

impl ShadowMap {
    /// Create the shadow map resources.
    ///
    /// The texture is typeless 32-bit, viewed as `D32Float` for writing and
    /// `R32Float` for sampling.
    pub fn create(device: &mut dyn GraphicsDevice, config: &ShadowConfig) -> RhiResult<Self> {
        let texture = device.create_texture(&TextureDesc::shadow_map(config.map_size))?;
        let views = device
            .create_depth_stencil_view(texture, Format::D32Float)
            .and_then(|dsv| {
                Ok((
                    dsv,
                    device.create_shader_resource_view(texture, Format::R32Float)?,
                ))
            });
        device.release_texture(texture);
        let (dsv, srv) = views?;

        let rasterizer = device.create_rasterizer_state(&RasterizerDesc::depth_biased(
            config.depth_bias,
            config.slope_scaled_depth_bias,
        ))?;
        let sampler = device.create_sampler_state(&SamplerDesc::shadow_comparison())?;

        debug!("Shadow map created ({0}x{0})", config.map_size);
        Ok(Self {
            size: config.map_size,
            dsv,
            srv,
            rasterizer,
            sampler,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn depth_stencil_view(&self) -> DepthStencilView {
        self.dsv
    }

    pub fn bindings(&self) -> ShadowBindings {
        ShadowBindings {
            srv: self.srv,
            sampler: self.sampler,
        }
    }

    /// Bind the depth view alone with the biased rasterizer and a viewport
    /// covering the map.
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.set_render_targets(&[], Some(self.dsv));
        device.set_rasterizer_state(Some(self.rasterizer));
        device.set_viewport(Viewport::full(self.size, self.size));
    }

    /// Render every entity's depth from the light into the bound map, then
    /// restore the main targets, viewport and rasterizer state.
    ///
    /// Returns the number of draws issued.
    pub fn render(
        &self,
        device: &mut dyn GraphicsDevice,
        state: &ShadowState,
        shader: ShaderHandle,
        scene: &mut Scene,
    ) -> RendererResult<u32> {
        device.set_shader(shader);
        device.set_matrix4x4(shader, shaders::VIEW, state.view_matrix());
        device.set_matrix4x4(shader, shaders::PROJECTION, state.projection_matrix());
        device.clear_shader(ShaderStage::Pixel);

        let (meshes, _, entities) = scene.split_mut();
        let mut draws = 0;
        for entity in entities.iter_mut() {
            let handle = entity.mesh();
            let mesh = meshes.get(handle).ok_or(SceneError::UnknownHandle {
                kind: "mesh",
                index: handle.index(),
            })?;

            device.set_matrix4x4(shader, shaders::WORLD, entity.transform_mut().world_matrix());
            device.copy_all_buffer_data(shader);

            device.set_vertex_buffer(Some(mesh.vertex_buffer()), Vertex::stride());
            device.set_index_buffer(Some(mesh.index_buffer()));
            device.draw_indexed(mesh.index_count(), 0, 0);
            draws += 1;
        }

        let (width, height) = device.back_buffer_size();
        let back_buffer = device.back_buffer();
        let main_depth = device.main_depth_buffer();
        device.set_render_targets(&[back_buffer], Some(main_depth));
        device.set_viewport(Viewport::full(width, height));
        device.set_rasterizer_state(None);

        Ok(draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_rhi::{Command, CullMode, RecordingDevice, ResourceKind};

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    fn look_direction(view: Mat4) -> Vec3 {
        view.row(2).truncate()
    }

    #[test]
    fn test_view_looks_along_light() {
        let directions = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.5),
            Vec3::new(-3.0, 0.2, 7.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];

        for direction in directions {
            let view = shadow_view(direction, 15.0);
            assert!(view.is_finite(), "non-finite view for {direction:?}");
            assert!(
                approx_eq_vec3(look_direction(view), direction.normalize()),
                "wrong look direction for {direction:?}"
            );
        }
    }

    #[test]
    fn test_view_backs_off_along_negative_direction() {
        let view = shadow_view(Vec3::new(0.0, -1.0, 0.0), 15.0);
        // The eye sits 15 units above the origin, so the origin is 15 units ahead
        let origin = view.transform_point3(Vec3::ZERO);
        assert!(approx_eq_vec3(origin, Vec3::new(0.0, 0.0, 15.0)));
    }

    #[test]
    fn test_projection_box() {
        let config = ShadowConfig::default();
        let projection = shadow_projection(&config);
        let corner = projection.project_point3(Vec3::new(12.5, 12.5, 30.0));
        assert!(approx_eq_vec3(corner, Vec3::new(1.0, 1.0, 1.0)));
        let near = projection.project_point3(Vec3::new(0.0, 0.0, 0.1));
        assert!(near.z.abs() < EPSILON);
    }

    #[test]
    fn test_set_direction_rebuilds_only_on_change() {
        let config = ShadowConfig::default();
        let mut state = ShadowState::new(&config, Vec3::NEG_Y);
        let before = state.view_matrix();

        assert!(!state.set_direction(Vec3::NEG_Y));
        assert_eq!(state.view_matrix(), before);

        assert!(state.set_direction(Vec3::new(0.1, -1.0, 0.0)));
        assert_ne!(state.view_matrix(), before);

        assert!(!state.set_direction(Vec3::ZERO));
        assert_eq!(state.direction(), Vec3::new(0.1, -1.0, 0.0));
    }

    #[test]
    fn test_tiny_direction_keeps_view_finite() {
        let config = ShadowConfig::default();
        let mut state = ShadowState::new(&config, Vec3::NEG_Y);
        let before = state.view_matrix();

        let tiny = Vec3::new(1e-30, -1e-30, 0.0);
        assert!(!state.set_direction(tiny));
        assert_eq!(state.view_matrix(), before);
        assert!(!state.set_direction(Vec3::new(f32::NAN, -1.0, 0.0)));

        assert!(shadow_view(tiny, 15.0).is_finite());
        assert!(ShadowState::new(&config, tiny).view_matrix().is_finite());
    }

    #[test]
    fn test_bind_targets_map_only() {
        let mut device = RecordingDevice::new(64, 64);
        let map = ShadowMap::create(&mut device, &ShadowConfig::default()).unwrap();
        device.take_commands();

        map.bind(&mut device);
        assert!(device.bound_render_targets().is_empty());
        assert_eq!(device.bound_depth_stencil(), Some(map.depth_stencil_view()));
        assert!(device
            .commands()
            .contains(&Command::SetViewport(Viewport::full(1024, 1024))));
    }

    #[test]
    fn test_create_resources() {
        let mut device = RecordingDevice::new(64, 64);
        let config = ShadowConfig::default();
        let map = ShadowMap::create(&mut device, &config).unwrap();

        assert_eq!(map.size(), 1024);
        assert_eq!(device.live_texture_count(), 0);

        let sampler = device.sampler_desc(map.bindings().sampler).unwrap();
        assert_eq!(*sampler, SamplerDesc::shadow_comparison());
        let rasterizer = device.rasterizer_desc(map.rasterizer).unwrap();
        assert_eq!(rasterizer.depth_bias, 1000);
        assert_eq!(rasterizer.slope_scaled_depth_bias, 1.0);
        assert_eq!(rasterizer.cull_mode, CullMode::Back);
    }

    #[test]
    fn test_create_failure() {
        let mut device = RecordingDevice::new(64, 64);
        device.fail_after(ResourceKind::Sampler, 0);
        assert!(ShadowMap::create(&mut device, &ShadowConfig::default()).is_err());
    }
}
