//! Transform component for scene objects.
//!
//! A [`Transform`] stores position, Euler rotation (pitch, yaw, roll) and
//! scale, and caches the world matrix built from them. Every mutator marks
//! the cache dirty; the next [`Transform::world_matrix`] call rebuilds it.
//!
//! # Conventions
//!
//! - Left-handed, +Y up, +Z forward
//! - Rotation applies roll (Z), then pitch (X), then yaw (Y)
//! - World matrix is `T * R * S` (scale first, translation last)
//!
//! # Example
//!
//! ```
//! use toon_scene::Transform;
//! use glam::Vec3;
//!
//! let mut transform = Transform::new().with_position(Vec3::new(1.0, 0.0, 0.0));
//! transform.move_absolute(Vec3::new(0.0, 2.0, 0.0));
//!
//! let world = transform.world_matrix();
//! let origin = world.transform_point3(Vec3::ZERO);
//! assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
//! ```

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Determinant magnitude under which a world matrix counts as singular.
const SINGULAR_EPSILON: f32 = 1e-6;

/// Position, rotation and scale with a lazily rebuilt world matrix.
///
/// The cached matrix is valid exactly when [`is_dirty`](Self::is_dirty)
/// returns `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    pitch_yaw_roll: Vec3,
    scale: Vec3,
    world_matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            pitch_yaw_roll: Vec3::ZERO,
            scale: Vec3::ONE,
            world_matrix: Mat4::IDENTITY,
            dirty: false,
        }
    }
}

impl Transform {
    /// Create a new transform at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_position`](Self::set_position).
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Builder form of [`set_rotation`](Self::set_rotation).
    pub fn with_rotation(mut self, pitch_yaw_roll: Vec3) -> Self {
        self.set_rotation(pitch_yaw_roll);
        self
    }

    /// Builder form of [`set_scale`](Self::set_scale).
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles as (pitch, yaw, roll) in radians.
    pub fn rotation(&self) -> Vec3 {
        self.pitch_yaw_roll
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Whether the cached world matrix is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, pitch_yaw_roll: Vec3) {
        self.pitch_yaw_roll = pitch_yaw_roll;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Translate by a world-space offset.
    pub fn move_absolute(&mut self, offset: Vec3) {
        self.position += offset;
        self.dirty = true;
    }

    /// Translate by an offset expressed in this transform's local axes.
    pub fn move_relative(&mut self, offset: Vec3) {
        self.position += self.orientation() * offset;
        self.dirty = true;
    }

    /// Add to pitch, yaw and roll.
    pub fn rotate(&mut self, delta_pitch_yaw_roll: Vec3) {
        self.pitch_yaw_roll += delta_pitch_yaw_roll;
        self.dirty = true;
    }

    /// Multiply the scale component-wise.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.dirty = true;
    }

    /// Rotation quaternion for the current Euler angles.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.pitch_yaw_roll.y,
            self.pitch_yaw_roll.x,
            self.pitch_yaw_roll.z,
        )
    }

    /// Local +Z rotated into world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    /// Local +X rotated into world space.
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    /// Local +Y rotated into world space.
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    /// The world matrix, rebuilt first if any component changed.
    pub fn world_matrix(&mut self) -> Mat4 {
        if self.dirty {
            self.world_matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position);
            self.dirty = false;
        }
        self.world_matrix
    }

    /// Inverse transpose of the (fresh) world matrix, for transforming
    /// normals under non-uniform scale.
    ///
    /// A singular world matrix (zero scale on some axis) yields identity so
    /// no NaN reaches the shaders.
    pub fn inverse_transpose_world_matrix(&mut self) -> Mat4 {
        let world = self.world_matrix();
        if world.determinant().abs() < SINGULAR_EPSILON {
            Mat4::IDENTITY
        } else {
            world.inverse().transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    fn approx_eq_mat4(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, EPSILON)
    }

    #[test]
    fn test_transform_default() {
        let mut t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert!(!t.is_dirty());
        assert_eq!(t.world_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_mutators_mark_dirty() {
        let mut t = Transform::new();
        let mutators: [fn(&mut Transform); 7] = [
            |t| t.set_position(Vec3::X),
            |t| t.set_rotation(Vec3::Y),
            |t| t.set_scale(Vec3::splat(2.0)),
            |t| t.move_absolute(Vec3::Z),
            |t| t.move_relative(Vec3::Z),
            |t| t.rotate(Vec3::X),
            |t| t.scale_by(Vec3::splat(0.5)),
        ];

        for mutate in mutators {
            t.world_matrix();
            assert!(!t.is_dirty());
            mutate(&mut t);
            assert!(t.is_dirty());
        }
    }

    #[test]
    fn test_world_matrix_is_idempotent() {
        let mut t = Transform::new()
            .with_position(Vec3::new(4.0, -1.0, 2.0))
            .with_rotation(Vec3::new(0.3, 1.2, -0.4))
            .with_scale(Vec3::new(1.0, 2.0, 3.0));

        let first = t.world_matrix();
        assert!(!t.is_dirty());
        let second = t.world_matrix();
        assert!(!t.is_dirty());
        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn test_world_matrix_reference() {
        let mut t = Transform::new()
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));

        // Scale x by 2, yaw 90 degrees (X -> -Z, Z -> X), then translate
        let expected = Mat4::from_cols(
            Vec4::new(0.0, 0.0, -2.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 2.0, 3.0, 1.0),
        );
        assert!(approx_eq_mat4(t.world_matrix(), expected));
    }

    #[test]
    fn test_world_matrix_reflects_composition() {
        let mut t = Transform::new();
        t.set_position(Vec3::new(5.0, 0.0, 0.0));
        t.rotate(Vec3::new(0.2, 0.0, 0.0));
        t.rotate(Vec3::new(0.0, 0.5, 0.1));
        t.scale_by(Vec3::new(3.0, 1.0, 1.0));

        let expected = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
            * Mat4::from_rotation_y(0.5)
            * Mat4::from_rotation_x(0.2)
            * Mat4::from_rotation_z(0.1)
            * Mat4::from_scale(Vec3::new(3.0, 1.0, 1.0));
        assert!(approx_eq_mat4(t.world_matrix(), expected));
    }

    #[test]
    fn test_move_relative_without_rotation_matches_absolute() {
        let offset = Vec3::new(1.5, -2.0, 0.25);
        let mut relative = Transform::new().with_position(Vec3::ONE);
        let mut absolute = relative.clone();

        relative.move_relative(offset);
        absolute.move_absolute(offset);

        assert!(approx_eq_vec3(relative.position(), absolute.position()));
    }

    #[test]
    fn test_move_relative_with_yaw() {
        let mut t = Transform::new().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        t.move_relative(Vec3::X);

        assert!(approx_eq_vec3(t.position(), Vec3::NEG_Z));
    }

    #[test]
    fn test_move_relative_refreshes_world_matrix() {
        let mut t = Transform::new();
        t.world_matrix();
        t.move_relative(Vec3::new(0.0, 0.0, 2.0));

        let origin = t.world_matrix().transform_point3(Vec3::ZERO);
        assert!(approx_eq_vec3(origin, Vec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_direction_vectors() {
        let t = Transform::default();

        // Default orientation: +Z forward, +X right, +Y up
        assert_eq!(t.forward(), Vec3::Z);
        assert_eq!(t.right(), Vec3::X);
        assert_eq!(t.up(), Vec3::Y);

        let turned = Transform::new().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(approx_eq_vec3(turned.forward(), Vec3::X));
    }

    #[test]
    fn test_inverse_transpose_uses_fresh_matrix() {
        let mut t = Transform::new();
        t.world_matrix();
        t.set_scale(Vec3::new(1.0, 2.0, 1.0));

        let normal = t.inverse_transpose_world_matrix();
        let expected = Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0)).inverse().transpose();
        assert!(approx_eq_mat4(normal, expected));
        assert!(!t.is_dirty());
    }

    #[test]
    fn test_inverse_transpose_non_invertible() {
        // Zero scale makes the transform non-invertible
        let mut t = Transform::new().with_scale(Vec3::ZERO);
        let normal = t.inverse_transpose_world_matrix();

        // Should return identity matrix as fallback, not NaN
        assert_eq!(normal, Mat4::IDENTITY);
        assert!(!normal.is_nan());
    }
}
