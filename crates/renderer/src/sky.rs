//! Cube-mapped sky drawn behind the scene.

use glam::Mat4;
use toon_resources::Mesh;
use toon_rhi::{
    ComparisonFunc, DepthStencilDesc, DepthStencilState, GraphicsDevice, RasterizerDesc,
    RasterizerState, SamplerState, ShaderHandle, ShaderResourceView, Vertex,
};
use tracing::debug;

use crate::error::RendererResult;
use crate::shaders;

/// Inputs for building a [`SkyBox`].
#[derive(Debug)]
pub struct SkyAssets {
    /// Cube geometry viewed from the inside.
    pub mesh: Mesh,
    pub cube_map: ShaderResourceView,
    pub sampler: SamplerState,
}

/// Sky cube with its own shaders and states.
///
/// The vertex shader pushes the cube to the far plane, so the depth test
/// uses LESS_EQUAL and the inside faces are kept by culling front faces.
#[derive(Debug)]
pub struct SkyBox {
    mesh: Mesh,
    cube_map: ShaderResourceView,
    sampler: SamplerState,
    rasterizer: RasterizerState,
    depth_state: DepthStencilState,
    vertex_shader: ShaderHandle,
    pixel_shader: ShaderHandle,
}

impl SkyBox {
    pub fn new(device: &mut dyn GraphicsDevice, assets: SkyAssets) -> RendererResult<Self> {
        let rasterizer = device.create_rasterizer_state(&RasterizerDesc::front_culled())?;
        let depth_state = device
            .create_depth_stencil_state(&DepthStencilDesc::depth_test(ComparisonFunc::LessEqual))?;
        let vertex_shader = device.create_shader(&shaders::sky_vertex())?;
        let pixel_shader = device.create_shader(&shaders::sky_pixel())?;

        debug!("Sky box created ({} indices)", assets.mesh.index_count());
        Ok(Self {
            mesh: assets.mesh,
            cube_map: assets.cube_map,
            sampler: assets.sampler,
            rasterizer,
            depth_state,
            vertex_shader,
            pixel_shader,
        })
    }

    /// Draw the sky into the bound targets and reset the states it changed.
    pub fn draw(&self, device: &mut dyn GraphicsDevice, view: Mat4, projection: Mat4) {
        device.set_rasterizer_state(Some(self.rasterizer));
        device.set_depth_stencil_state(Some(self.depth_state));

        let vs = self.vertex_shader;
        let ps = self.pixel_shader;
        device.set_shader(vs);
        device.set_shader(ps);
        device.set_sampler_state(ps, shaders::SKY_SAMPLER, self.sampler);
        device.set_shader_resource_view(ps, shaders::SKY_TEXTURE, Some(self.cube_map));

        device.set_matrix4x4(vs, shaders::VIEW, view);
        device.set_matrix4x4(vs, shaders::PROJECTION, projection);
        device.copy_all_buffer_data(vs);

        device.set_vertex_buffer(Some(self.mesh.vertex_buffer()), Vertex::stride());
        device.set_index_buffer(Some(self.mesh.index_buffer()));
        device.draw_indexed(self.mesh.index_count(), 0, 0);

        device.set_rasterizer_state(None);
        device.set_depth_stencil_state(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use toon_resources::primitives;
    use toon_rhi::{
        Command, CullMode, Format, RecordingDevice, SamplerDesc, TextureDesc, count_draws,
    };

    fn sky(device: &mut RecordingDevice) -> SkyBox {
        let mesh = Mesh::new(device, "sky", primitives::cube(Vec3::ONE)).unwrap();
        let texture = device.create_texture(&TextureDesc::cube(64, Format::Rgba8Unorm)).unwrap();
        let cube_map = device
            .create_shader_resource_view(texture, Format::Rgba8Unorm)
            .unwrap();
        let sampler = device.create_sampler_state(&SamplerDesc::clamp()).unwrap();
        SkyBox::new(
            device,
            SkyAssets {
                mesh,
                cube_map,
                sampler,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_states() {
        let mut device = RecordingDevice::new(64, 64);
        let sky = sky(&mut device);

        assert_eq!(
            device.rasterizer_desc(sky.rasterizer).unwrap().cull_mode,
            CullMode::Front
        );
        assert_eq!(
            device.depth_stencil_desc(sky.depth_state).unwrap().depth_func,
            ComparisonFunc::LessEqual
        );
    }

    #[test]
    fn test_draw_resets_states() {
        let mut device = RecordingDevice::new(64, 64);
        let sky = sky(&mut device);
        device.take_commands();

        sky.draw(&mut device, Mat4::IDENTITY, Mat4::IDENTITY);

        let commands = device.commands();
        assert_eq!(count_draws(commands), 1);
        assert_eq!(
            commands[0],
            Command::SetRasterizerState(Some(sky.rasterizer))
        );
        let tail = &commands[commands.len() - 2..];
        assert_eq!(tail[0], Command::SetRasterizerState(None));
        assert_eq!(tail[1], Command::SetDepthStencilState(None));
        assert!(commands.contains(&Command::DrawIndexed {
            index_count: 36,
            first_index: 0,
            base_vertex: 0,
        }));
    }
}
