//! Free-flying first-person camera.

use glam::{Mat4, Vec2, Vec3};
use toon_core::config::CameraConfig;
use toon_platform::{InputState, KeyCode, MouseButton};

use crate::controls::ControlMode;
use crate::transform::Transform;

/// A perspective camera driven by keyboard translation and mouse-look.
///
/// The view matrix is rebuilt on every [`update`](Self::update); the
/// projection only when the aspect ratio changes.
#[derive(Clone, Debug)]
pub struct Camera {
    transform: Transform,
    /// Vertical field of view in radians
    fov_y: f32,
    near: f32,
    far: f32,
    /// Units per second
    movement_speed: f32,
    /// Radians per pixel per second
    look_speed: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    /// Pointer position seen on the previous update.
    last_pointer: Option<Vec2>,
}

impl Camera {
    /// Create a camera from its configuration and the current aspect ratio.
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        let transform = Transform::new()
            .with_position(Vec3::from_array(config.position))
            .with_rotation(Vec3::from_array(config.pitch_yaw_roll));

        let mut camera = Self {
            transform,
            fov_y: config.fov_y,
            near: config.near,
            far: config.far,
            movement_speed: config.movement_speed,
            look_speed: config.look_speed,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            last_pointer: None,
        };
        camera.update_projection_matrix(aspect_ratio);
        camera.update_view_matrix();
        camera
    }

    /// Apply one frame of input.
    ///
    /// Translation keys only act in [`ControlMode::Camera`]; mouse-look
    /// (primary button held) works in every mode.
    pub fn update(&mut self, dt: f32, input: &InputState, mode: ControlMode) {
        if mode == ControlMode::Camera {
            let step = self.movement_speed * dt;
            let direction = Vec3::new(
                input.axis(KeyCode::KeyD, KeyCode::KeyA),
                input.axis(KeyCode::Space, KeyCode::KeyX),
                input.axis(KeyCode::KeyW, KeyCode::KeyS),
            );
            if direction != Vec3::ZERO {
                self.transform.move_relative(direction * step);
            }
        }

        let (x, y) = input.mouse_position();
        let pointer = Vec2::new(x, y);
        if input.is_mouse_pressed(MouseButton::Left)
            && let Some(last) = self.last_pointer
        {
            let delta = (pointer - last) * dt * self.look_speed;
            // Horizontal motion yaws, vertical motion pitches
            self.transform.rotate(Vec3::new(delta.y, delta.x, 0.0));
        }

        self.update_view_matrix();
        self.last_pointer = Some(pointer);
    }

    /// Rebuild the left-handed view matrix from position and forward.
    pub fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_to_lh(
            self.transform.position(),
            self.transform.forward(),
            Vec3::Y,
        );
    }

    /// Rebuild the left-handed perspective projection (depth 0..1).
    pub fn update_projection_matrix(&mut self, aspect_ratio: f32) {
        self.projection_matrix = Mat4::perspective_lh(self.fov_y, aspect_ratio, self.near, self.far);
        tracing::debug!("Camera projection updated (aspect {:.3})", aspect_ratio);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access. Call [`update_view_matrix`](Self::update_view_matrix)
    /// afterwards if the view must change before the next update.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// World-space look direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    /// Camera at the origin looking down +Z.
    fn origin_camera() -> Camera {
        let config = CameraConfig {
            position: [0.0; 3],
            pitch_yaw_roll: [0.0; 3],
            ..CameraConfig::default()
        };
        Camera::from_config(&config, 16.0 / 9.0)
    }

    #[test]
    fn test_default_config_faces_back_toward_origin() {
        let camera = Camera::from_config(&CameraConfig::default(), 16.0 / 9.0);
        assert!(approx_eq_vec3(camera.position(), Vec3::new(0.0, -2.0, 4.5)));
        // Yaw of pi turns +Z into -Z
        assert!(camera.forward().z < -0.9);
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let mut camera = origin_camera();
        camera.transform_mut().set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.update_view_matrix();

        let eye = camera.view_matrix().transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert!(approx_eq_vec3(eye, Vec3::ZERO));

        // A point ahead of the camera lands on +Z in view space
        let ahead = camera.view_matrix().transform_point3(Vec3::new(1.0, 2.0, 8.0));
        assert!(approx_eq_vec3(ahead, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_w_moves_forward_in_camera_mode() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_key_pressed(KeyCode::KeyW);

        camera.update(0.5, &input, ControlMode::Camera);
        // speed 6 * 0.5 s
        assert!(approx_eq_vec3(camera.position(), Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_strafe_and_vertical_keys() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_key_pressed(KeyCode::KeyA);
        input.on_key_pressed(KeyCode::Space);

        camera.update(1.0, &input, ControlMode::Camera);
        assert!(approx_eq_vec3(camera.position(), Vec3::new(-6.0, 6.0, 0.0)));
    }

    #[test]
    fn test_translation_gated_by_mode() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_key_pressed(KeyCode::KeyW);

        camera.update(1.0, &input, ControlMode::MovePoint);
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn test_mouse_look_in_any_mode() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_mouse_moved(100.0, 100.0);
        camera.update(0.1, &input, ControlMode::MoveSpot);

        input.on_mouse_pressed(MouseButton::Left);
        input.on_mouse_moved(102.0, 99.0);
        camera.update(0.1, &input, ControlMode::MoveSpot);

        // dx = 2 px, dy = -1 px, scaled by dt 0.1 and look speed 10
        let rotation = camera.transform().rotation();
        assert!(approx_eq_vec3(rotation, Vec3::new(-1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_first_press_does_not_jump() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_mouse_pressed(MouseButton::Left);
        input.on_mouse_moved(500.0, 300.0);

        camera.update(0.1, &input, ControlMode::Camera);
        assert_eq!(camera.transform().rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_pointer_tracked_without_button() {
        let mut camera = origin_camera();
        let mut input = InputState::new();
        input.on_mouse_moved(10.0, 10.0);
        camera.update(0.1, &input, ControlMode::Camera);

        // Move without the button, then press: delta starts from the
        // latest position, not the first one
        input.on_mouse_moved(50.0, 10.0);
        camera.update(0.1, &input, ControlMode::Camera);
        input.on_mouse_pressed(MouseButton::Left);
        camera.update(0.1, &input, ControlMode::Camera);

        assert_eq!(camera.transform().rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_projection_tracks_aspect() {
        let mut camera = origin_camera();
        let wide = camera.projection_matrix();
        camera.update_projection_matrix(1.0);
        let square = camera.projection_matrix();

        assert!(square.x_axis.x > wide.x_axis.x);
        assert_eq!(square.y_axis.y, wide.y_axis.y);
    }
}
