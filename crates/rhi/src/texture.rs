//! Texture descriptors.

/// Pixel formats used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// 8-bit normalized RGBA, scene color.
    Rgba8Unorm,
    /// 16-bit float RGBA, view-space normals.
    Rgba16Float,
    /// 32-bit float single channel, linear depth.
    R32Float,
    /// Typeless 32-bit storage, viewed as depth or as float.
    R32Typeless,
    /// 32-bit float depth.
    D32Float,
    /// 24-bit depth plus 8-bit stencil, main depth buffer.
    D24UnormS8Uint,
}

impl Format {
    /// Whether the format can back a depth-stencil view.
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            Format::D32Float | Format::D24UnormS8Uint | Format::R32Typeless
        )
    }
}

/// Bind flags for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureUsage {
    pub render_target: bool,
    pub depth_stencil: bool,
    pub shader_resource: bool,
}

impl TextureUsage {
    /// Written as a color target, then sampled.
    pub const RENDER_TARGET_SAMPLED: Self = Self {
        render_target: true,
        depth_stencil: false,
        shader_resource: true,
    };

    /// Written as depth, then sampled.
    pub const DEPTH_SAMPLED: Self = Self {
        render_target: false,
        depth_stencil: true,
        shader_resource: true,
    };

    /// Sampled only.
    pub const SAMPLED: Self = Self {
        render_target: false,
        depth_stencil: false,
        shader_resource: true,
    };
}

/// Description of a 2D texture or texture array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: Format,
    pub usage: TextureUsage,
    /// 1 for plain 2D textures, 6 for cube maps.
    pub array_size: u32,
}

impl TextureDesc {
    /// A sampled color render target.
    pub fn render_target(width: u32, height: u32, format: Format) -> Self {
        Self {
            width,
            height,
            format,
            usage: TextureUsage::RENDER_TARGET_SAMPLED,
            array_size: 1,
        }
    }

    /// A square typeless depth texture that can be both a depth target and a
    /// shader resource.
    pub fn shadow_map(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            format: Format::R32Typeless,
            usage: TextureUsage::DEPTH_SAMPLED,
            array_size: 1,
        }
    }

    /// A sampled cube map.
    pub fn cube(size: u32, format: Format) -> Self {
        Self {
            width: size,
            height: size,
            format,
            usage: TextureUsage::SAMPLED,
            array_size: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_map_desc() {
        let desc = TextureDesc::shadow_map(1024);
        assert_eq!((desc.width, desc.height), (1024, 1024));
        assert_eq!(desc.format, Format::R32Typeless);
        assert!(desc.usage.depth_stencil);
        assert!(desc.usage.shader_resource);
        assert!(!desc.usage.render_target);
    }

    #[test]
    fn test_depth_formats() {
        assert!(Format::D32Float.is_depth());
        assert!(Format::R32Typeless.is_depth());
        assert!(!Format::R32Float.is_depth());
        assert!(!Format::Rgba8Unorm.is_depth());
    }
}
