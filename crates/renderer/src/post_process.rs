//! Outline post-process.
//!
//! Reads the scene color, normals and depth targets and writes the final
//! image to the back buffer with a single full-screen triangle. Edges are
//! found from depth and normal discontinuities.

use toon_core::config::PostProcessConfig;
use toon_rhi::{GraphicsDevice, RhiResult, SamplerState, ShaderHandle};
use tracing::debug;

use crate::shaders;
use crate::targets::SceneTargets;

/// Vertices of the full-screen triangle.
pub const FULL_SCREEN_VERTEX_COUNT: u32 = 3;

/// Pixel texture slots cleared after the pass so the scene targets can be
/// bound for writing again.
pub const PIXEL_RESOURCE_SLOTS: u32 = 16;

/// Post-process shaders and edge strengths.
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcess {
    vertex_shader: ShaderHandle,
    pixel_shader: ShaderHandle,
    sampler: SamplerState,
    depth_adjust: f32,
    normal_adjust: f32,
}

impl PostProcess {
    /// Create the post-process shaders. `sampler` should clamp.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        config: &PostProcessConfig,
        sampler: SamplerState,
    ) -> RhiResult<Self> {
        let vertex_shader = device.create_shader(&shaders::post_vertex())?;
        let pixel_shader = device.create_shader(&shaders::post_pixel())?;
        debug!(
            "Post-process ready (depth {}, normal {})",
            config.depth_adjust, config.normal_adjust
        );

        Ok(Self {
            vertex_shader,
            pixel_shader,
            sampler,
            depth_adjust: config.depth_adjust,
            normal_adjust: config.normal_adjust,
        })
    }

    pub fn pixel_shader(&self) -> ShaderHandle {
        self.pixel_shader
    }

    pub fn depth_adjust(&self) -> f32 {
        self.depth_adjust
    }

    pub fn set_depth_adjust(&mut self, value: f32) {
        self.depth_adjust = value;
    }

    pub fn normal_adjust(&self) -> f32 {
        self.normal_adjust
    }

    pub fn set_normal_adjust(&mut self, value: f32) {
        self.normal_adjust = value;
    }

    /// Bind the back buffer alone, releasing the scene targets for
    /// sampling.
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        let back_buffer = device.back_buffer();
        device.set_render_targets(&[back_buffer], None);
    }

    /// Draw the edge pass over the bound back buffer.
    pub fn render(&self, device: &mut dyn GraphicsDevice, targets: &SceneTargets) {
        let ps = self.pixel_shader;
        device.set_shader(self.vertex_shader);
        device.set_shader_resource_view(ps, shaders::PIXELS, Some(targets.color.srv));
        device.set_shader_resource_view(ps, shaders::NORMALS, Some(targets.normals.srv));
        device.set_shader_resource_view(ps, shaders::DEPTH, Some(targets.depth.srv));
        device.set_sampler_state(ps, shaders::POST_SAMPLER, self.sampler);
        device.set_shader(ps);

        let (width, height) = targets.size();
        device.set_float(ps, shaders::PIXEL_WIDTH, 1.0 / width as f32);
        device.set_float(ps, shaders::PIXEL_HEIGHT, 1.0 / height as f32);
        device.set_float(ps, shaders::DEPTH_ADJUST, self.depth_adjust);
        device.set_float(ps, shaders::NORMAL_ADJUST, self.normal_adjust);
        device.copy_all_buffer_data(ps);

        // The triangle is generated from vertex ids
        device.set_index_buffer(None);
        device.set_vertex_buffer(None, 0);
        device.draw(FULL_SCREEN_VERTEX_COUNT, 0);

        device.unbind_pixel_shader_resources(PIXEL_RESOURCE_SLOTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_rhi::{Command, ParameterValue, RecordingDevice, SamplerDesc};

    #[test]
    fn test_render_sequence() {
        let mut device = RecordingDevice::new(200, 100);
        let sampler = device.create_sampler_state(&SamplerDesc::clamp()).unwrap();
        let targets = SceneTargets::create(&mut device, 200, 100).unwrap();
        let post = PostProcess::new(&mut device, &PostProcessConfig::default(), sampler).unwrap();
        device.take_commands();

        post.bind(&mut device);
        post.render(&mut device, &targets);

        let commands = device.commands();
        assert_eq!(
            commands[0],
            Command::SetRenderTargets {
                colors: vec![device.back_buffer()],
                depth: None,
            }
        );
        let draw = commands
            .iter()
            .position(|c| {
                *c == Command::Draw {
                    vertex_count: 3,
                    first_vertex: 0,
                }
            })
            .unwrap();
        assert_eq!(commands[draw - 1], Command::SetVertexBuffer { buffer: None, stride: 0 });
        assert_eq!(commands[draw + 1], Command::UnbindPixelShaderResources(16));

        let ps = post.pixel_shader();
        assert_eq!(
            device.parameter(ps, shaders::PIXEL_WIDTH),
            Some(&ParameterValue::Float(1.0 / 200.0))
        );
        assert_eq!(
            device.parameter(ps, shaders::PIXEL_HEIGHT),
            Some(&ParameterValue::Float(0.01))
        );
        assert_eq!(
            device.parameter(ps, shaders::NORMALS),
            Some(&ParameterValue::ShaderResource(Some(targets.normals.srv)))
        );
        assert_eq!(
            device.parameter(ps, shaders::DEPTH_ADJUST),
            Some(&ParameterValue::Float(5.0))
        );
    }
}
