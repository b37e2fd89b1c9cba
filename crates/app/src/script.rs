//! Scripted input for the headless demo.
//!
//! An [`InputScript`] is a list of input changes keyed by frame number. At
//! the start of each frame the due changes are applied to the polled
//! [`InputState`], the same way window events would be.

use toon_platform::{InputState, KeyCode, MouseButton};

/// One input change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Press(KeyCode),
    Release(KeyCode),
    MouseDown,
    MouseUp,
    MouseMove(f32, f32),
    /// Window resize to width x height.
    Resize(u32, u32),
}

/// Frame-ordered input timeline.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<(u64, Action)>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `action` at `frame`. Actions on the same frame run in insertion
    /// order.
    pub fn at(mut self, frame: u64, action: Action) -> Self {
        let index = self.events.partition_point(|(f, _)| *f <= frame);
        self.events.insert(index, (frame, action));
        self
    }

    /// Hold `key` from `start` for `frames` frames.
    pub fn hold(self, key: KeyCode, start: u64, frames: u64) -> Self {
        self.at(start, Action::Press(key))
            .at(start + frames, Action::Release(key))
    }

    /// Tap `key` for a single frame.
    pub fn tap(self, key: KeyCode, frame: u64) -> Self {
        self.hold(key, frame, 1)
    }

    /// The demo walk-through: walk and look around, cycle through the light
    /// modes nudging each light, toggle shadows, resize, then quit.
    pub fn demo() -> Self {
        Self::new()
            // Walk forward, strafe, look around
            .hold(KeyCode::KeyW, 10, 40)
            .hold(KeyCode::KeyD, 50, 20)
            .at(70, Action::MouseMove(400.0, 300.0))
            .at(70, Action::MouseDown)
            .at(71, Action::MouseMove(430.0, 295.0))
            .at(80, Action::MouseMove(460.0, 290.0))
            .at(90, Action::MouseUp)
            // Directional light
            .tap(KeyCode::Tab, 100)
            .hold(KeyCode::KeyD, 105, 30)
            .hold(KeyCode::KeyW, 135, 20)
            // Point light
            .tap(KeyCode::Tab, 160)
            .tap(KeyCode::Digit2, 162)
            .hold(KeyCode::KeyQ, 165, 30)
            .hold(KeyCode::ArrowDown, 195, 20)
            // Spot light
            .tap(KeyCode::Tab, 220)
            .tap(KeyCode::Digit3, 222)
            .hold(KeyCode::KeyJ, 225, 20)
            .hold(KeyCode::ArrowLeft, 245, 20)
            // Back to the camera with the sun on
            .tap(KeyCode::Tab, 270)
            .tap(KeyCode::Digit1, 272)
            .tap(KeyCode::KeyV, 280)
            .tap(KeyCode::KeyV, 300)
            .at(310, Action::Resize(1600, 900))
            .at(320, Action::Resize(0, 0))
            .tap(KeyCode::Escape, 340)
    }

    /// Last frame with an action.
    pub fn last_frame(&self) -> u64 {
        self.events.last().map_or(0, |(frame, _)| *frame)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Apply the actions due at `frame` to `input`.
    ///
    /// Resizes cannot be expressed as input; they are returned in order.
    pub fn apply(&self, frame: u64, input: &mut InputState) -> Vec<(u32, u32)> {
        let mut resizes = Vec::new();
        for (_, action) in self.events.iter().filter(|(f, _)| *f == frame) {
            match *action {
                Action::Press(key) => input.on_key_pressed(key),
                Action::Release(key) => input.on_key_released(key),
                Action::MouseDown => input.on_mouse_pressed(MouseButton::Left),
                Action::MouseUp => input.on_mouse_released(MouseButton::Left),
                Action::MouseMove(x, y) => input.on_mouse_moved(x, y),
                Action::Resize(width, height) => resizes.push((width, height)),
            }
        }
        resizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_presses_and_releases() {
        let script = InputScript::new().hold(KeyCode::KeyW, 2, 3);
        let mut input = InputState::new();

        script.apply(1, &mut input);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        script.apply(2, &mut input);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        script.apply(5, &mut input);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_events_stay_sorted() {
        let script = InputScript::new()
            .at(10, Action::MouseUp)
            .at(3, Action::MouseDown)
            .at(10, Action::Resize(1, 1));
        assert_eq!(script.last_frame(), 10);
        assert_eq!(script.len(), 3);

        let mut input = InputState::new();
        assert_eq!(script.apply(10, &mut input), vec![(1, 1)]);
    }

    #[test]
    fn test_demo_ends_with_escape() {
        let script = InputScript::demo();
        let mut input = InputState::new();
        script.apply(script.last_frame() - 1, &mut input);
        assert!(input.is_key_pressed(KeyCode::Escape));
    }
}
