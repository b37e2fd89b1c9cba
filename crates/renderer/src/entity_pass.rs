//! Main geometry pass.
//!
//! Every entity is drawn in scene order with one indexed draw. Frame-wide
//! data (lights, shadow matrices, camera) is re-staged on each entity's
//! shaders because entities may use different shader programs.

use glam::{Mat4, Vec3};
use toon_rhi::{GraphicsDevice, SamplerState, ShaderResourceView, Vertex};
use toon_scene::{Scene, SceneError};
use tracing::trace;

use crate::error::RendererResult;
use crate::shaders;
use crate::shadow::ShadowBindings;
use crate::ubo::GpuLight;

/// Lookup textures that quantize lighting into toon bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToonRamps {
    pub diffuse: ShaderResourceView,
    pub specular: ShaderResourceView,
}

/// Frame-wide inputs of the entity pass.
#[derive(Debug, Clone)]
pub struct EntityFrame<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub lights: &'a [GpuLight],
    pub shadow_view: Mat4,
    pub shadow_projection: Mat4,
    /// Whether the shadow map was written this frame and should be sampled.
    pub render_shadows: bool,
    /// Absent when the shadow map could not be created.
    pub shadow_map: Option<ShadowBindings>,
    pub clamp_sampler: SamplerState,
    pub ramps: ToonRamps,
}

/// Draw all entities of `scene` into the currently bound targets.
///
/// Returns the number of draws issued, which equals the entity count.
pub fn draw_entities(
    device: &mut dyn GraphicsDevice,
    frame: &EntityFrame<'_>,
    scene: &mut Scene,
) -> RendererResult<u32> {
    let light_bytes: &[u8] = bytemuck::cast_slice(frame.lights);
    let render_shadows = frame.render_shadows && frame.shadow_map.is_some();

    let (meshes, materials, entities) = scene.split_mut();
    let mut draws = 0;
    for entity in entities.iter_mut() {
        let mesh = meshes.get(entity.mesh()).ok_or(SceneError::UnknownHandle {
            kind: "mesh",
            index: entity.mesh().index(),
        })?;
        let material = materials
            .get(entity.material())
            .ok_or(SceneError::UnknownHandle {
                kind: "material",
                index: entity.material().index(),
            })?;
        let vs = material.vertex_shader;
        let ps = material.pixel_shader;

        // Frame data
        device.set_data(ps, shaders::LIGHTS, light_bytes);
        device.set_int(ps, shaders::LIGHT_COUNT, frame.lights.len() as i32);
        device.set_int(ps, shaders::RENDER_SHADOWS, i32::from(render_shadows));
        device.set_float3(ps, shaders::CAMERA_POS, frame.camera_position);
        device.set_float(ps, shaders::SPECULAR_INTENSITY, material.specular_intensity);
        device.copy_all_buffer_data(ps);

        device.set_sampler_state(ps, shaders::CLAMP_SAMPLER, frame.clamp_sampler);
        device.set_shader_resource_view(ps, shaders::RAMP_MAP, Some(frame.ramps.diffuse));
        device.set_shader_resource_view(ps, shaders::SPECULAR_RAMP_MAP, Some(frame.ramps.specular));
        if let Some(shadow) = frame.shadow_map {
            device.set_sampler_state(ps, shaders::SHADOW_SAMPLER, shadow.sampler);
            device.set_shader_resource_view(ps, shaders::SHADOW_MAP, Some(shadow.srv));
        }
        device.set_matrix4x4(vs, shaders::SHADOW_VIEW, frame.shadow_view);
        device.set_matrix4x4(vs, shaders::SHADOW_PROJECTION, frame.shadow_projection);

        // Material
        device.set_shader(vs);
        device.set_shader(ps);
        device.set_sampler_state(ps, shaders::MATERIAL_SAMPLER, material.sampler);
        let textures = material.textures;
        device.set_shader_resource_view(ps, shaders::ALBEDO, Some(textures.albedo));
        if let Some(normal) = textures.normal {
            device.set_shader_resource_view(ps, shaders::NORMAL_MAP, Some(normal));
        }
        device.set_shader_resource_view(ps, shaders::ROUGHNESS_MAP, Some(textures.roughness));
        device.set_shader_resource_view(ps, shaders::METALNESS_MAP, Some(textures.metalness));

        // Object
        let transform = entity.transform_mut();
        device.set_float4(vs, shaders::COLOR_TINT, material.color_tint);
        device.set_matrix4x4(vs, shaders::WORLD, transform.world_matrix());
        device.set_matrix4x4(vs, shaders::VIEW, frame.view);
        device.set_matrix4x4(vs, shaders::PROJECTION, frame.projection);
        device.set_matrix4x4(
            vs,
            shaders::INV_TRANSPOSE_WORLD,
            transform.inverse_transpose_world_matrix(),
        );
        device.copy_all_buffer_data(vs);

        device.set_vertex_buffer(Some(mesh.vertex_buffer()), Vertex::stride());
        device.set_index_buffer(Some(mesh.index_buffer()));
        device.draw_indexed(mesh.index_count(), 0, 0);
        draws += 1;

        trace!("Drew '{}' ({} indices)", mesh.name(), mesh.index_count());
    }

    Ok(draws)
}
