//! Sandbox configuration.
//!
//! Every tunable constant of the frame pipeline lives here so the demo can be
//! reshaped from a RON file without recompiling. All sections carry
//! `#[serde(default)]`, so a config file only needs the fields it overrides.
//!
//! # Example
//!
//! ```
//! use toon_core::SandboxConfig;
//!
//! let config = SandboxConfig::from_ron_str("(shadow: (map_size: 2048))").unwrap();
//! assert_eq!(config.shadow.map_size, 2048);
//! assert_eq!(config.window.width, 1280);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Window (back buffer) dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Initial camera placement and lens settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space start position
    pub position: [f32; 3],
    /// Start orientation as pitch, yaw, roll in radians
    pub pitch_yaw_roll: [f32; 3],
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Translation speed in units per second
    pub movement_speed: f32,
    /// Mouse-look speed in radians per pixel per second
    pub look_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -2.0, 4.5],
            pitch_yaw_roll: [0.05, std::f32::consts::PI, 0.0],
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 100.0,
            movement_speed: 6.0,
            look_speed: 10.0,
        }
    }
}

/// Shadow map settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadowConfig {
    /// Whether shadows start enabled
    pub enabled: bool,
    /// Shadow map edge length in texels
    pub map_size: u32,
    /// Constant depth bias in depth-buffer units
    pub depth_bias: i32,
    /// Slope-scaled depth bias
    pub slope_scaled_depth_bias: f32,
    /// Width and height of the orthographic light box in world units
    pub projection_extent: f32,
    /// Light-space near plane
    pub near: f32,
    /// Light-space far plane
    pub far: f32,
    /// Distance the light eye backs off along the negative light direction
    pub back_off: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            map_size: 1024,
            depth_bias: 1000,
            slope_scaled_depth_bias: 1.0,
            projection_extent: 25.0,
            near: 0.1,
            far: 30.0,
            back_off: 15.0,
        }
    }
}

/// Outline post-process strengths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostProcessConfig {
    /// Weight of depth discontinuities
    pub depth_adjust: f32,
    /// Weight of normal discontinuities
    pub normal_adjust: f32,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            depth_adjust: 5.0,
            normal_adjust: 5.0,
        }
    }
}

/// Top-level configuration for the sandbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SandboxConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Shadow settings
    pub shadow: ShadowConfig,
    /// Post-process settings
    pub post_process: PostProcessConfig,
    /// Clear color for every render target (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            shadow: ShadowConfig::default(),
            post_process: PostProcessConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl SandboxConfig {
    /// Parse a configuration from RON text and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid RON, or
    /// holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Check value ranges that would otherwise produce degenerate matrices
    /// or zero-sized resources.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config("window size must be non-zero".to_string()));
        }
        if self.shadow.map_size == 0 {
            return Err(Error::Config("shadow map size must be non-zero".to_string()));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(Error::Config(format!(
                "camera planes must satisfy 0 < near < far (near={}, far={})",
                self.camera.near, self.camera.far
            )));
        }
        if self.shadow.near <= 0.0 || self.shadow.far <= self.shadow.near {
            return Err(Error::Config(format!(
                "shadow planes must satisfy 0 < near < far (near={}, far={})",
                self.shadow.near, self.shadow.far
            )));
        }
        if self.shadow.projection_extent <= 0.0 {
            return Err(Error::Config(
                "shadow projection extent must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
