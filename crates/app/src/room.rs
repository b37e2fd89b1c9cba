//! Demo living room.
//!
//! Builds the scene the sandbox renders: a floor, four walls and box
//! stand-ins for the furniture, each with its own textured material, plus
//! the toon ramps and a sky box. Textures are small device-side
//! placeholders; no image files are read.

use anyhow::{Context, Result};
use glam::{Vec3, Vec4};
use toon_renderer::{RendererAssets, SkyAssets, ToonRamps, shaders};
use toon_resources::{Material, MaterialTextures, Mesh, primitives};
use toon_rhi::{
    Format, GraphicsDevice, SamplerDesc, SamplerState, ShaderHandle, ShaderResourceView,
    TextureDesc, TextureUsage,
};
use toon_scene::{Entity, Scene, Transform};
use tracing::{debug, info};

/// Scene plus the renderer inputs that go with it.
pub struct Room {
    pub scene: Scene,
    pub assets: RendererAssets,
}

/// Box stand-in for one piece of the room.
struct Piece {
    name: &'static str,
    material: usize,
    position: Vec3,
    size: Vec3,
    pitch_yaw_roll: Vec3,
}

const fn piece(name: &'static str, material: usize, position: Vec3, size: Vec3) -> Piece {
    Piece {
        name,
        material,
        position,
        size,
        pitch_yaw_roll: Vec3::ZERO,
    }
}

/// Material names, indexed by [`Piece::material`].
const MATERIALS: [(&str, bool); 8] = [
    ("carpet", true),
    ("wall", true),
    ("table", true),
    ("sofa", true),
    ("tv", false),
    ("coffee_table", true),
    ("cradle", false),
    ("sword", true),
];

const PIECES: [Piece; 11] = [
    piece("floor", 0, Vec3::new(0.0, -5.0, 0.0), Vec3::new(15.0, 1.0, 15.0)),
    piece("front_wall", 1, Vec3::new(0.0, -0.5, -8.0), Vec3::new(15.0, 10.0, 1.0)),
    piece("back_wall", 1, Vec3::new(0.0, -0.5, 8.0), Vec3::new(15.0, 10.0, 1.0)),
    piece("left_wall", 1, Vec3::new(-8.0, -0.5, 0.0), Vec3::new(1.0, 10.0, 17.0)),
    piece("right_wall", 1, Vec3::new(8.0, -0.5, 0.0), Vec3::new(1.0, 10.0, 17.0)),
    piece("tv_table", 2, Vec3::new(0.0, -4.0, -4.5), Vec3::new(4.0, 1.0, 1.5)),
    piece("sofa", 3, Vec3::new(0.0, -3.75, 4.5), Vec3::new(5.0, 1.5, 2.0)),
    Piece {
        pitch_yaw_roll: Vec3::new(0.0, std::f32::consts::PI, 0.0),
        ..piece("tv", 4, Vec3::new(0.0, -2.85, -4.5), Vec3::new(3.0, 1.8, 0.2))
    },
    piece("coffee_table", 5, Vec3::new(0.0, -4.1, 0.0), Vec3::new(2.5, 0.8, 1.5)),
    piece("cradle", 6, Vec3::new(0.0, -3.4, 0.0), Vec3::new(0.6, 0.6, 0.4)),
    Piece {
        pitch_yaw_roll: Vec3::new(-0.01, std::f32::consts::FRAC_PI_4, 0.0),
        ..piece("sword", 7, Vec3::new(1.0, -3.6, 0.0), Vec3::new(0.1, 0.05, 1.4))
    },
];

fn placeholder_texture(
    device: &mut dyn GraphicsDevice,
    width: u32,
    height: u32,
) -> Result<ShaderResourceView> {
    let texture = device.create_texture(&TextureDesc {
        width,
        height,
        format: Format::Rgba8Unorm,
        usage: TextureUsage::SAMPLED,
        array_size: 1,
    })?;
    let view = device.create_shader_resource_view(texture, Format::Rgba8Unorm);
    device.release_texture(texture);
    Ok(view?)
}

fn material_textures(device: &mut dyn GraphicsDevice, with_normal: bool) -> Result<MaterialTextures> {
    let normal = if with_normal {
        Some(placeholder_texture(device, 4, 4)?)
    } else {
        None
    };
    Ok(MaterialTextures {
        albedo: placeholder_texture(device, 4, 4)?,
        normal,
        roughness: placeholder_texture(device, 4, 4)?,
        metalness: placeholder_texture(device, 4, 4)?,
    })
}

fn build_materials(
    device: &mut dyn GraphicsDevice,
    vs: ShaderHandle,
    ps: ShaderHandle,
    sampler: SamplerState,
) -> Result<Vec<Material>> {
    MATERIALS
        .iter()
        .map(|&(name, with_normal)| {
            let textures = material_textures(device, with_normal)
                .with_context(|| format!("textures for material '{name}'"))?;
            Ok(Material::new(Vec4::ONE, vs, ps, 1.0, sampler, textures))
        })
        .collect()
}

fn sky_assets(device: &mut dyn GraphicsDevice, sampler: SamplerState) -> Result<SkyAssets> {
    let mesh = Mesh::new(device, "sky", primitives::cube(Vec3::ONE))?;
    let texture = device.create_texture(&TextureDesc::cube(64, Format::Rgba8Unorm))?;
    let cube_map = device.create_shader_resource_view(texture, Format::Rgba8Unorm);
    device.release_texture(texture);
    Ok(SkyAssets {
        mesh,
        cube_map: cube_map?,
        sampler,
    })
}

/// Build the room on `device`.
pub fn build_room(device: &mut dyn GraphicsDevice) -> Result<Room> {
    let vs = device.create_shader(&shaders::entity_vertex())?;
    let ps = device.create_shader(&shaders::entity_pixel())?;
    let sampler = device.create_sampler_state(&SamplerDesc::wrap_anisotropic(16))?;

    let mut scene = Scene::new();
    let cube = scene.add_mesh(Mesh::new(device, "cube", primitives::cube(Vec3::ONE))?);
    let materials: Vec<_> = build_materials(device, vs, ps, sampler)?
        .into_iter()
        .map(|material| scene.add_material(material))
        .collect();

    for piece in &PIECES {
        let transform = Transform::new()
            .with_position(piece.position)
            .with_rotation(piece.pitch_yaw_roll)
            .with_scale(piece.size);
        scene.spawn(Entity::new(cube, materials[piece.material]).with_transform(transform))?;
        debug!("Placed {}", piece.name);
    }

    let ramps = ToonRamps {
        diffuse: placeholder_texture(device, 256, 1)?,
        specular: placeholder_texture(device, 256, 1)?,
    };
    let sky = sky_assets(device, sampler)?;

    info!(
        "Room built: {} entities, {} materials",
        scene.entities().len(),
        scene.materials().len()
    );
    Ok(Room {
        scene,
        assets: RendererAssets {
            ramps,
            sky: Some(sky),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_rhi::RecordingDevice;

    #[test]
    fn test_room_contents() {
        let mut device = RecordingDevice::new(320, 240);
        let room = build_room(&mut device).unwrap();

        assert_eq!(room.scene.entities().len(), PIECES.len());
        assert_eq!(room.scene.materials().len(), MATERIALS.len());
        assert_eq!(room.scene.meshes().len(), 1);
        assert!(room.assets.sky.is_some());

        let floor = &room.scene.entities()[0];
        assert_eq!(floor.transform().position(), Vec3::new(0.0, -5.0, 0.0));
        assert_eq!(floor.transform().scale(), Vec3::new(15.0, 1.0, 15.0));
    }

    #[test]
    fn test_tv_has_no_normal_map() {
        let mut device = RecordingDevice::new(320, 240);
        let room = build_room(&mut device).unwrap();

        let tv = &room.scene.entities()[7];
        let material = room.scene.material(tv.material()).unwrap();
        assert!(material.textures.normal.is_none());
    }
}
