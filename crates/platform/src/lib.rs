//! Platform input layer for the toon sandbox.
//!
//! This crate provides the polled input source the scene reads every update:
//! - Keyboard state keyed by winit [`KeyCode`]
//! - Pointer position and buttons
//! - Edge triggers for toggle-style actions

mod input;

pub use input::{EdgeTrigger, InputState, KeyCode, MouseButton};

// Re-export the winit event type hosts feed into `InputState::on_window_event`
pub use winit::event::WindowEvent;
