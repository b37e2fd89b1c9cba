//! Sampler descriptors.

use crate::pipeline::ComparisonFunc;

/// Texture coordinate addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Wrap,
    Clamp,
    Border,
}

/// Texture filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Linear,
    Anisotropic,
    /// Linear filtering of depth comparison results (PCF).
    ComparisonLinear,
}

/// Sampler state description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub address: AddressMode,
    pub filter: Filter,
    pub max_anisotropy: u32,
    pub comparison: Option<ComparisonFunc>,
    pub border_color: [f32; 4],
}

impl SamplerDesc {
    /// Wrapping anisotropic sampler for material textures.
    pub fn wrap_anisotropic(max_anisotropy: u32) -> Self {
        Self {
            address: AddressMode::Wrap,
            filter: Filter::Anisotropic,
            max_anisotropy,
            comparison: None,
            border_color: [0.0; 4],
        }
    }

    /// Clamping linear sampler for lookup ramps and full-screen reads.
    pub fn clamp() -> Self {
        Self {
            address: AddressMode::Clamp,
            filter: Filter::Linear,
            max_anisotropy: 1,
            comparison: None,
            border_color: [0.0; 4],
        }
    }

    /// Comparison sampler for shadow maps. Samples outside the map compare
    /// against a border depth of 1.0 and read as lit.
    pub fn shadow_comparison() -> Self {
        Self {
            address: AddressMode::Border,
            filter: Filter::ComparisonLinear,
            max_anisotropy: 1,
            comparison: Some(ComparisonFunc::Less),
            border_color: [1.0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_comparison_sampler() {
        let desc = SamplerDesc::shadow_comparison();
        assert_eq!(desc.address, AddressMode::Border);
        assert_eq!(desc.filter, Filter::ComparisonLinear);
        assert_eq!(desc.comparison, Some(ComparisonFunc::Less));
        assert_eq!(desc.border_color, [1.0; 4]);
    }

    #[test]
    fn test_clamp_sampler_has_no_comparison() {
        assert_eq!(SamplerDesc::clamp().comparison, None);
        assert_eq!(SamplerDesc::clamp().address, AddressMode::Clamp);
    }
}
