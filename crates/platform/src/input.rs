//! Input handling for keyboard and mouse.
//!
//! [`InputState`] is a level-based snapshot: hosts feed window events into it
//! and the scene polls it once per update. Toggle-style actions that must fire
//! once per key press use an [`EdgeTrigger`] on top of the polled level.

use std::collections::HashSet;

use tracing::trace;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

pub use winit::keyboard::KeyCode;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// Tracks the current state of keyboard and mouse input.
#[derive(Debug, Default)]
pub struct InputState {
    /// Currently pressed keys
    pressed_keys: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    pressed_buttons: HashSet<MouseButton>,
    /// Current pointer position in client coordinates
    mouse_position: (f32, f32),
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit window event into the state.
    ///
    /// Events that carry no keyboard or pointer information are ignored.
    pub fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state.is_pressed() {
                        self.on_key_pressed(key);
                    } else {
                        self.on_key_released(key);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.on_mouse_pressed((*button).into()),
                ElementState::Released => self.on_mouse_released((*button).into()),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.on_mouse_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::Focused(false) => {
                trace!("Focus lost, releasing all keys and buttons");
                self.pressed_keys.clear();
                self.pressed_buttons.clear();
            }
            _ => {}
        }
    }

    /// Handle a key press event.
    pub fn on_key_pressed(&mut self, key: KeyCode) {
        self.pressed_keys.insert(key);
    }

    /// Handle a key release event.
    pub fn on_key_released(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    /// Handle a mouse button press event.
    pub fn on_mouse_pressed(&mut self, button: MouseButton) {
        self.pressed_buttons.insert(button);
    }

    /// Handle a mouse button release event.
    pub fn on_mouse_released(&mut self, button: MouseButton) {
        self.pressed_buttons.remove(&button);
    }

    /// Handle mouse movement.
    pub fn on_mouse_moved(&mut self, x: f32, y: f32) {
        self.mouse_position = (x, y);
    }

    /// Check if a key is currently held down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a mouse button is currently held down.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Get the current mouse position.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Returns +1, -1 or 0 for a pair of opposing keys.
    ///
    /// Both keys held cancel out.
    pub fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.is_key_pressed(positive) {
            value += 1.0;
        }
        if self.is_key_pressed(negative) {
            value -= 1.0;
        }
        value
    }
}

/// Rising-edge detector over a polled level.
///
/// Fires once on the update where the level goes from released to held.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeTrigger {
    previous: bool,
}

impl EdgeTrigger {
    /// Create a trigger in the released state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level and report whether it is a rising edge.
    pub fn update(&mut self, current: bool) -> bool {
        let fired = current && !self.previous;
        self.previous = current;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_release() {
        let mut input = InputState::new();
        assert!(!input.is_key_pressed(KeyCode::KeyW));

        input.on_key_pressed(KeyCode::KeyW);
        assert!(input.is_key_pressed(KeyCode::KeyW));

        input.on_key_released(KeyCode::KeyW);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_mouse_state() {
        let mut input = InputState::new();
        input.on_mouse_moved(10.0, 20.0);
        input.on_mouse_pressed(MouseButton::Left);

        assert_eq!(input.mouse_position(), (10.0, 20.0));
        assert!(input.is_mouse_pressed(MouseButton::Left));
        assert!(!input.is_mouse_pressed(MouseButton::Right));
    }

    #[test]
    fn test_axis() {
        let mut input = InputState::new();
        assert_eq!(input.axis(KeyCode::KeyD, KeyCode::KeyA), 0.0);

        input.on_key_pressed(KeyCode::KeyD);
        assert_eq!(input.axis(KeyCode::KeyD, KeyCode::KeyA), 1.0);

        input.on_key_pressed(KeyCode::KeyA);
        assert_eq!(input.axis(KeyCode::KeyD, KeyCode::KeyA), 0.0);

        input.on_key_released(KeyCode::KeyD);
        assert_eq!(input.axis(KeyCode::KeyD, KeyCode::KeyA), -1.0);
    }

    #[test]
    fn test_edge_trigger_fires_once_per_press() {
        let mut trigger = EdgeTrigger::new();
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
        assert!(!trigger.update(true));
        assert!(!trigger.update(true));
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = InputState::new();
        input.on_key_pressed(KeyCode::Tab);
        input.on_mouse_pressed(MouseButton::Left);

        input.on_window_event(&WindowEvent::Focused(false));

        assert!(!input.is_key_pressed(KeyCode::Tab));
        assert!(!input.is_mouse_pressed(MouseButton::Left));
    }
}
