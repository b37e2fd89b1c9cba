//! UI overlay hook.
//!
//! Text rendering lives outside the renderer. After post-processing the
//! renderer hands an [`Overlay`] a snapshot of the interactive state and
//! lets it draw onto the back buffer.

use glam::Vec3;
use toon_rhi::GraphicsDevice;
use toon_scene::{ControlMode, LightRig};

/// Interactive state shown by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayInfo {
    pub frame_index: u64,
    pub mode: ControlMode,
    pub shadows_enabled: bool,
    pub rig: LightRig,
}

impl OverlayInfo {
    /// Help and status text for the current control mode.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Toon Shader Sandbox".to_string(),
            "== Controls ==".to_string(),
            "TAB: Change control mode".to_string(),
            "V: Toggle Real-Time Shadows".to_string(),
            "1: Directional Light".to_string(),
            "2: Point Light".to_string(),
            "3: Spot Light".to_string(),
            "== Control Mode ==".to_string(),
            format!("Current Mode: {}", self.mode.label()),
        ];

        let rig = &self.rig;
        match self.mode {
            ControlMode::Camera => {
                lines.push("Use WASD to move around".to_string());
                lines.push("Click and Drag to look".to_string());
            }
            ControlMode::MoveDirectional => {
                lines.push("- Use WASDQE to change the lighting direction".to_string());
                lines.push(vector_line("Direction", rig.directional_direction));
            }
            ControlMode::MovePoint => {
                lines.push("- Use WASDQE to change the point light position".to_string());
                lines.push("- Use Up/Down Arrow to adjust range".to_string());
                lines.push(vector_line("Position", rig.point_position));
                lines.push(format!("Range: {:.3}", rig.point_range));
            }
            ControlMode::MoveSpot => {
                lines.push("- Use WASDQE to change the spot light position".to_string());
                lines.push("- Use IJKLUO to change the spot light direction".to_string());
                lines.push("- Use Up/Down Arrow to adjust range".to_string());
                lines.push("- Use Left/Right Arrow to adjust falloff".to_string());
                lines.push(vector_line("Position", rig.spot_position));
                lines.push(vector_line("Direction", rig.spot_direction));
                lines.push(format!("Range: {:.3}", rig.spot_range));
                lines.push(format!("Falloff: {:.3}", rig.spot_falloff));
            }
        }

        lines.push(format!(
            "Shadows: {}",
            if self.shadows_enabled { "On" } else { "Off" }
        ));
        lines
    }
}

fn vector_line(name: &str, v: Vec3) -> String {
    format!("{name}: X: {:.3} Y: {:.3} Z: {:.3}", v.x, v.y, v.z)
}

/// Draws on top of the post-processed image.
pub trait Overlay {
    fn draw(&mut self, device: &mut dyn GraphicsDevice, info: &OverlayInfo);
}

/// Overlay that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl Overlay for NullOverlay {
    fn draw(&mut self, _device: &mut dyn GraphicsDevice, _info: &OverlayInfo) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(mode: ControlMode) -> OverlayInfo {
        OverlayInfo {
            frame_index: 0,
            mode,
            shadows_enabled: true,
            rig: LightRig::default(),
        }
    }

    #[test]
    fn test_mode_label_line() {
        let lines = info(ControlMode::MovePoint).lines();
        assert!(lines.contains(&"Current Mode: Point Light Mode".to_string()));
        assert!(lines.contains(&"Range: 20.000".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Shadows: On"));
    }

    #[test]
    fn test_directional_shows_direction() {
        let lines = info(ControlMode::MoveDirectional).lines();
        assert!(lines.contains(&"Direction: X: 0.000 Y: -1.000 Z: 0.000".to_string()));
    }
}
