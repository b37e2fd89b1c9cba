//! Material definitions.
//!
//! A material is a shader pair plus the PBR texture set and constants the
//! entity pass binds before each draw.

use glam::Vec4;
use toon_rhi::{SamplerState, ShaderHandle, ShaderResourceView};

/// Texture views sampled by the entity pixel shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialTextures {
    pub albedo: ShaderResourceView,
    /// Tangent-space normal map. Without one the shader uses vertex normals.
    pub normal: Option<ShaderResourceView>,
    pub roughness: ShaderResourceView,
    pub metalness: ShaderResourceView,
}

/// Surface description shared by any number of entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Multiplied into the albedo.
    pub color_tint: Vec4,
    pub vertex_shader: ShaderHandle,
    pub pixel_shader: ShaderHandle,
    /// Scales the specular ramp lookup.
    pub specular_intensity: f32,
    /// Sampler for the texture set.
    pub sampler: SamplerState,
    pub textures: MaterialTextures,
}

impl Material {
    pub fn new(
        color_tint: Vec4,
        vertex_shader: ShaderHandle,
        pixel_shader: ShaderHandle,
        specular_intensity: f32,
        sampler: SamplerState,
        textures: MaterialTextures,
    ) -> Self {
        Self {
            color_tint,
            vertex_shader,
            pixel_shader,
            specular_intensity,
            sampler,
            textures,
        }
    }

    /// Same material with a different tint.
    pub fn with_tint(&self, color_tint: Vec4) -> Self {
        Self {
            color_tint,
            ..self.clone()
        }
    }
}
