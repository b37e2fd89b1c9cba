//! Light definitions for the scene.
//!
//! All light types share one flat record, [`Light`], tagged by
//! [`LightKind`]. The renderer packs it into a fixed 80-byte GPU layout.

use glam::Vec3;

use crate::error::{SceneError, SceneResult};

/// Capacity of a [`LightSet`] and of the shader's light array.
pub const MAX_LIGHTS: usize = 128;

/// Light type tag. The discriminants are the shader's type constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LightKind {
    Directional = 0,
    Point = 1,
    Spot = 2,
}

/// A light of any kind. Fields a kind does not use are ignored by the
/// shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Direction the light travels (directional, spot).
    pub direction: Vec3,
    /// World position (point, spot).
    pub position: Vec3,
    /// Attenuation range (point, spot).
    pub range: f32,
    pub intensity: f32,
    pub diffuse: Vec3,
    pub ambient: Vec3,
    /// Cone falloff exponent (spot).
    pub spot_falloff: f32,
    pub enabled: bool,
}

impl Light {
    fn base(kind: LightKind) -> Self {
        Self {
            kind,
            direction: Vec3::ZERO,
            position: Vec3::ZERO,
            range: 0.0,
            intensity: 1.0,
            diffuse: Vec3::ONE,
            ambient: Vec3::ZERO,
            spot_falloff: 0.0,
            enabled: true,
        }
    }

    /// A sun-like light travelling along `direction`.
    pub fn directional(direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::base(LightKind::Directional)
        }
    }

    /// An omnidirectional light at `position` reaching `range` units.
    pub fn point(position: Vec3, range: f32) -> Self {
        Self {
            position,
            range,
            ..Self::base(LightKind::Point)
        }
    }

    /// A cone light at `position` aimed along `direction`.
    pub fn spot(position: Vec3, direction: Vec3, range: f32, falloff: f32) -> Self {
        Self {
            position,
            direction,
            range,
            spot_falloff: falloff,
            ..Self::base(LightKind::Spot)
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_colors(mut self, diffuse: Vec3, ambient: Vec3) -> Self {
        self.diffuse = diffuse;
        self.ambient = ambient;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Fixed-capacity, append-only collection of lights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightSet {
    lights: Vec<Light>,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light and return its index.
    pub fn push(&mut self, light: Light) -> SceneResult<usize> {
        if self.lights.len() >= MAX_LIGHTS {
            return Err(SceneError::LightSetFull {
                capacity: MAX_LIGHTS,
            });
        }
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn as_slice(&self) -> &[Light] {
        &self.lights
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn enabled_count(&self) -> usize {
        self.lights.iter().filter(|l| l.enabled).count()
    }

    /// Make light `index` the only enabled light.
    ///
    /// Does nothing if it is already enabled (other lights keep their
    /// state) or if `index` is out of range.
    pub fn toggle(&mut self, index: usize) {
        match self.lights.get(index) {
            None => {
                tracing::debug!("Ignoring toggle of missing light {}", index);
                return;
            }
            Some(light) if light.enabled => return,
            Some(_) => {}
        }

        for light in &mut self.lights {
            light.enabled = false;
        }
        self.lights[index].enabled = true;
        tracing::debug!("Light {} enabled exclusively", index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_lights() -> LightSet {
        let mut set = LightSet::new();
        set.push(Light::directional(Vec3::NEG_Y)).unwrap();
        set.push(Light::point(Vec3::Y * 5.0, 20.0).with_enabled(false))
            .unwrap();
        set.push(Light::spot(Vec3::ZERO, Vec3::NEG_Z, 10.0, 25.0).with_enabled(false))
            .unwrap();
        set
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(LightKind::Directional as i32, 0);
        assert_eq!(LightKind::Point as i32, 1);
        assert_eq!(LightKind::Spot as i32, 2);
    }

    #[test]
    fn test_toggle_enables_exactly_one() {
        let mut set = three_lights();
        set.toggle(2);

        assert_eq!(set.enabled_count(), 1);
        assert!(set.get(2).unwrap().enabled);
    }

    #[test]
    fn test_toggle_enabled_light_is_noop() {
        let mut set = three_lights();
        // Two lights on at once is allowed outside toggle
        set.get_mut(1).unwrap().enabled = true;
        let before = set.clone();

        set.toggle(0);
        assert_eq!(set, before);
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut set = three_lights();
        let before = set.clone();
        set.toggle(3);
        assert_eq!(set, before);
    }

    #[test]
    fn test_capacity() {
        let mut set = LightSet::new();
        for _ in 0..MAX_LIGHTS {
            set.push(Light::point(Vec3::ZERO, 1.0)).unwrap();
        }
        assert_eq!(
            set.push(Light::point(Vec3::ZERO, 1.0)),
            Err(SceneError::LightSetFull {
                capacity: MAX_LIGHTS
            })
        );
        assert_eq!(set.len(), MAX_LIGHTS);
    }

    #[test]
    fn test_builders() {
        let light = Light::spot(Vec3::X, Vec3::NEG_Y, 8.0, 12.0)
            .with_intensity(10.0)
            .with_colors(Vec3::new(1.0, 0.5, 0.0), Vec3::splat(0.01));

        assert_eq!(light.kind, LightKind::Spot);
        assert_eq!(light.range, 8.0);
        assert_eq!(light.spot_falloff, 12.0);
        assert_eq!(light.intensity, 10.0);
        assert_eq!(light.ambient, Vec3::splat(0.01));
        assert!(light.enabled);
    }
}
