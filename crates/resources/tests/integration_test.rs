//! Integration tests for resource pools on a recording device.

use glam::{Vec3, Vec4};
use toon_resources::{
    Material, MaterialTextures, Mesh, Pool, ResourceError, primitives,
};
use toon_rhi::{
    Format, GraphicsDevice, RecordingDevice, ResourceKind, SamplerDesc, ShaderDesc, ShaderStage,
    TextureDesc,
};

fn texture_set(device: &mut RecordingDevice) -> MaterialTextures {
    let mut view = || {
        let desc = TextureDesc {
            width: 4,
            height: 4,
            format: Format::Rgba8Unorm,
            usage: toon_rhi::TextureUsage::SAMPLED,
            array_size: 1,
        };
        let texture = device.create_texture(&desc).expect("texture");
        device
            .create_shader_resource_view(texture, Format::Rgba8Unorm)
            .expect("view")
    };
    MaterialTextures {
        albedo: view(),
        normal: None,
        roughness: view(),
        metalness: view(),
    }
}

#[test]
fn test_room_geometry_in_pools() {
    let mut device = RecordingDevice::new(320, 240);
    let mut meshes = Pool::new();

    let cube = meshes.insert(
        Mesh::new(&mut device, "cube", primitives::cube(Vec3::ONE)).expect("cube upload"),
    );
    let floor = meshes.insert(
        Mesh::new(&mut device, "floor", primitives::plane(20.0, 20.0)).expect("plane upload"),
    );

    assert_eq!(meshes[cube].index_count(), 36);
    assert_eq!(meshes[floor].index_count(), 6);

    let names: Vec<&str> = meshes.iter().map(|(_, mesh)| mesh.name()).collect();
    assert_eq!(names, vec!["cube", "floor"]);
}

#[test]
fn test_shared_material_variants() {
    let mut device = RecordingDevice::new(320, 240);
    let vs = device
        .create_shader(&ShaderDesc::new("VertexShader", ShaderStage::Vertex))
        .expect("vs");
    let ps = device
        .create_shader(&ShaderDesc::new("PixelShader", ShaderStage::Pixel))
        .expect("ps");
    let sampler = device
        .create_sampler_state(&SamplerDesc::wrap_anisotropic(16))
        .expect("sampler");
    let textures = texture_set(&mut device);

    let mut materials = Pool::new();
    let plain = Material::new(Vec4::ONE, vs, ps, 1.0, sampler, textures);
    let tinted = plain.with_tint(Vec4::new(0.8, 0.6, 0.4, 1.0));
    let a = materials.insert(plain);
    let b = materials.insert(tinted);

    assert_eq!(materials[a].pixel_shader, materials[b].pixel_shader);
    assert_ne!(materials[a].color_tint, materials[b].color_tint);
}

#[test]
fn test_upload_failure_surfaces_device_error() {
    let mut device = RecordingDevice::new(320, 240);
    // Vertex buffer succeeds, index buffer fails
    device.fail_after(ResourceKind::Buffer, 1);

    let result = Mesh::new(&mut device, "cube", primitives::cube(Vec3::ONE));
    assert!(matches!(result, Err(ResourceError::Rhi(_))));
}
