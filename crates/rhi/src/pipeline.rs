//! Fixed-function pipeline state descriptors.
//!
//! States are immutable once created; passes switch between a handful of
//! prebuilt states instead of mutating one.

/// Face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    #[default]
    Back,
}

/// Depth comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonFunc {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    Always,
}

/// Rasterizer state description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDesc {
    pub cull_mode: CullMode,
    /// Constant depth bias in depth-buffer units.
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip: bool,
}

impl Default for RasterizerDesc {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            depth_bias: 0,
            depth_bias_clamp: 0.0,
            slope_scaled_depth_bias: 0.0,
            depth_clip: true,
        }
    }
}

impl RasterizerDesc {
    /// Back-face culling with a constant and slope-scaled depth bias, used
    /// while rendering shadow casters.
    pub fn depth_biased(depth_bias: i32, slope_scaled_depth_bias: f32) -> Self {
        Self {
            depth_bias,
            slope_scaled_depth_bias,
            ..Self::default()
        }
    }

    /// Front-face culling, for geometry viewed from the inside.
    pub fn front_culled() -> Self {
        Self {
            cull_mode: CullMode::Front,
            ..Self::default()
        }
    }
}

/// Depth-stencil state description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthStencilDesc {
    pub depth_enable: bool,
    pub depth_write: bool,
    pub depth_func: ComparisonFunc,
}

impl DepthStencilDesc {
    /// Depth test enabled with the given comparison; writes on.
    pub fn depth_test(depth_func: ComparisonFunc) -> Self {
        Self {
            depth_enable: true,
            depth_write: true,
            depth_func,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rasterizer() {
        let desc = RasterizerDesc::default();
        assert_eq!(desc.cull_mode, CullMode::Back);
        assert_eq!(desc.depth_bias, 0);
        assert!(desc.depth_clip);
    }

    #[test]
    fn test_depth_biased_keeps_back_culling() {
        let desc = RasterizerDesc::depth_biased(1000, 1.0);
        assert_eq!(desc.cull_mode, CullMode::Back);
        assert_eq!(desc.depth_bias, 1000);
        assert_eq!(desc.slope_scaled_depth_bias, 1.0);
    }

    #[test]
    fn test_front_culled() {
        assert_eq!(RasterizerDesc::front_culled().cull_mode, CullMode::Front);
    }
}
