//! Shader programs and their parameter names.
//!
//! The parameter constants are the exact cbuffer variable and resource
//! names the HLSL programs declare. The descriptor builders register those
//! names with the device so bindings by name resolve.

use toon_rhi::{ShaderDesc, ShaderStage};

// Entity vertex stage
pub const COLOR_TINT: &str = "colorTint";
pub const WORLD: &str = "world";
pub const VIEW: &str = "view";
pub const PROJECTION: &str = "projection";
pub const INV_TRANSPOSE_WORLD: &str = "invTransposeWorld";
pub const SHADOW_VIEW: &str = "shadowView";
pub const SHADOW_PROJECTION: &str = "shadowProjection";

// Entity pixel stage
pub const LIGHTS: &str = "lights";
pub const LIGHT_COUNT: &str = "lightCount";
pub const RENDER_SHADOWS: &str = "renderShadows";
pub const CAMERA_POS: &str = "cameraPos";
pub const SPECULAR_INTENSITY: &str = "specularIntensity";
pub const MATERIAL_SAMPLER: &str = "SamplerOptions";
pub const CLAMP_SAMPLER: &str = "ClampSampler";
pub const SHADOW_SAMPLER: &str = "shadowSampler";
pub const ALBEDO: &str = "Albedo";
pub const NORMAL_MAP: &str = "NormalMap";
pub const ROUGHNESS_MAP: &str = "RoughnessMap";
pub const METALNESS_MAP: &str = "MetalnessMap";
pub const RAMP_MAP: &str = "RampMap";
pub const SPECULAR_RAMP_MAP: &str = "specularRampMap";
pub const SHADOW_MAP: &str = "shadowMap";

// Sky pixel stage
pub const SKY_SAMPLER: &str = "samplerOptions";
pub const SKY_TEXTURE: &str = "skyTexture";

// Post-process pixel stage
pub const PIXELS: &str = "pixels";
pub const NORMALS: &str = "normals";
pub const DEPTH: &str = "depth";
pub const POST_SAMPLER: &str = "samplerOptions";
pub const PIXEL_WIDTH: &str = "pixelWidth";
pub const PIXEL_HEIGHT: &str = "pixelHeight";
pub const DEPTH_ADJUST: &str = "depthAdjust";
pub const NORMAL_ADJUST: &str = "normalAdjust";

/// Toon-lit entity vertex shader.
pub fn entity_vertex() -> ShaderDesc {
    ShaderDesc::new("VertexShader", ShaderStage::Vertex).with_parameters(&[
        COLOR_TINT,
        WORLD,
        VIEW,
        PROJECTION,
        INV_TRANSPOSE_WORLD,
        SHADOW_VIEW,
        SHADOW_PROJECTION,
    ])
}

/// Toon-lit entity pixel shader writing color, normals and depth.
pub fn entity_pixel() -> ShaderDesc {
    ShaderDesc::new("PixelShader", ShaderStage::Pixel).with_parameters(&[
        LIGHTS,
        LIGHT_COUNT,
        RENDER_SHADOWS,
        CAMERA_POS,
        SPECULAR_INTENSITY,
        MATERIAL_SAMPLER,
        CLAMP_SAMPLER,
        SHADOW_SAMPLER,
        ALBEDO,
        NORMAL_MAP,
        ROUGHNESS_MAP,
        METALNESS_MAP,
        RAMP_MAP,
        SPECULAR_RAMP_MAP,
        SHADOW_MAP,
    ])
}

/// Depth-only vertex shader for the shadow map.
pub fn shadow_vertex() -> ShaderDesc {
    ShaderDesc::new("ShadowMapVS", ShaderStage::Vertex).with_parameters(&[WORLD, VIEW, PROJECTION])
}

pub fn sky_vertex() -> ShaderDesc {
    ShaderDesc::new("SkyVS", ShaderStage::Vertex).with_parameters(&[VIEW, PROJECTION])
}

pub fn sky_pixel() -> ShaderDesc {
    ShaderDesc::new("SkyPS", ShaderStage::Pixel).with_parameters(&[SKY_SAMPLER, SKY_TEXTURE])
}

/// Full-screen triangle generated from the vertex id.
pub fn post_vertex() -> ShaderDesc {
    ShaderDesc::new("PostProcessVS", ShaderStage::Vertex)
}

/// Depth/normal edge detection.
pub fn post_pixel() -> ShaderDesc {
    ShaderDesc::new("PostProcessPS", ShaderStage::Pixel).with_parameters(&[
        PIXELS,
        NORMALS,
        DEPTH,
        POST_SAMPLER,
        PIXEL_WIDTH,
        PIXEL_HEIGHT,
        DEPTH_ADJUST,
        NORMAL_ADJUST,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages() {
        assert_eq!(entity_vertex().stage, ShaderStage::Vertex);
        assert_eq!(entity_pixel().stage, ShaderStage::Pixel);
        assert_eq!(shadow_vertex().stage, ShaderStage::Vertex);
        assert_eq!(post_pixel().stage, ShaderStage::Pixel);
    }

    #[test]
    fn test_entity_pixel_declares_frame_data() {
        let desc = entity_pixel();
        for name in [LIGHTS, LIGHT_COUNT, RENDER_SHADOWS, CAMERA_POS, SHADOW_MAP] {
            assert!(desc.declares(name), "missing {name}");
        }
        assert!(!desc.declares(SHADOW_VIEW));
    }

    #[test]
    fn test_post_pixel_declares_inputs() {
        let desc = post_pixel();
        for name in [PIXELS, NORMALS, DEPTH, PIXEL_WIDTH, PIXEL_HEIGHT] {
            assert!(desc.declares(name), "missing {name}");
        }
    }
}
