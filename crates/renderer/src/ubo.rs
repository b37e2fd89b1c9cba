//! Constant buffer layouts shared with the shaders.
//!
//! These structures must match the HLSL cbuffer layouts exactly.
//! All structures use `#[repr(C)]` for predictable memory layout and implement
//! `Pod` and `Zeroable` for safe byte casting.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use toon_scene::{Light, LightSet};

/// One entry of the pixel shader's `lights` array.
///
/// This structure matches the HLSL `Light` struct. Every row is 16 bytes so
/// the array packs without implicit padding.
///
/// # Memory Layout
///
/// - Offset 0: type (4 bytes), direction (12 bytes)
/// - Offset 16: range (4 bytes), position (12 bytes)
/// - Offset 32: intensity (4 bytes), diffuse color (12 bytes)
/// - Offset 48: spot falloff (4 bytes), ambient color (12 bytes)
/// - Offset 64: enabled (4 bytes), padding (12 bytes)
/// - Total size: 80 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// Light type tag (0 directional, 1 point, 2 spot).
    pub kind: i32,
    pub direction: Vec3,
    pub range: f32,
    pub position: Vec3,
    pub intensity: f32,
    pub diffuse: Vec3,
    pub spot_falloff: f32,
    pub ambient: Vec3,
    /// Nonzero when the light contributes.
    pub enabled: i32,
    /// Padding to a 16-byte row.
    pub _padding: Vec3,
}

impl GpuLight {
    /// Size of the struct in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        Self {
            kind: light.kind as i32,
            direction: light.direction,
            range: light.range,
            position: light.position,
            intensity: light.intensity,
            diffuse: light.diffuse,
            spot_falloff: light.spot_falloff,
            ambient: light.ambient,
            enabled: i32::from(light.enabled),
            _padding: Vec3::ZERO,
        }
    }
}

/// Pack a light set for upload.
///
/// [`LightSet`] never holds more than
/// [`MAX_LIGHTS`](toon_scene::MAX_LIGHTS) lights, so the result always
/// fits the shader's array.
pub fn pack_lights(lights: &LightSet) -> Vec<GpuLight> {
    lights.iter().map(GpuLight::from).collect()
}
