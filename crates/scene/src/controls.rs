//! Interactive control modes and the live light rig.
//!
//! The sandbox has one set of movement keys shared by four modes. In
//! [`ControlMode::Camera`] they fly the camera; in the other modes they
//! nudge the parameters of one demo light, held in a [`LightRig`] and
//! copied into the [`LightSet`] after every nudge.

use glam::Vec3;
use toon_platform::{InputState, KeyCode};

use crate::error::SceneResult;
use crate::light::{Light, LightSet};

/// What the movement keys currently drive. Cycles in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    #[default]
    Camera,
    MoveDirectional,
    MovePoint,
    MoveSpot,
}

impl ControlMode {
    /// All modes in cycle order.
    pub const ALL: [ControlMode; 4] = [
        ControlMode::Camera,
        ControlMode::MoveDirectional,
        ControlMode::MovePoint,
        ControlMode::MoveSpot,
    ];

    /// The following mode, wrapping back to `Camera`.
    pub fn next(self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Position in the cycle, 0 to 3.
    pub fn ordinal(self) -> usize {
        match self {
            ControlMode::Camera => 0,
            ControlMode::MoveDirectional => 1,
            ControlMode::MovePoint => 2,
            ControlMode::MoveSpot => 3,
        }
    }

    /// Mode at `ordinal` modulo the cycle length.
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal % Self::ALL.len()]
    }

    /// Index of the light-set entry this mode edits.
    ///
    /// The demo pushes its lights in the order directional, point, spot;
    /// reordering them breaks this table.
    pub fn light_slot(self) -> Option<usize> {
        match self {
            ControlMode::Camera => None,
            ControlMode::MoveDirectional => Some(0),
            ControlMode::MovePoint => Some(1),
            ControlMode::MoveSpot => Some(2),
        }
    }

    /// Human-readable name for the overlay.
    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Camera => "Camera Mode",
            ControlMode::MoveDirectional => "Direction Light Mode",
            ControlMode::MovePoint => "Point Light Mode",
            ControlMode::MoveSpot => "Spot Light Mode",
        }
    }
}

const DIRECTION_STEP: f32 = 0.1;
const DIRECTION_LIMIT: f32 = 1.0;
const POSITION_STEP: f32 = 1.0;
const POSITION_LIMIT: f32 = 20.0;
const RANGE_STEP: f32 = 5.0;
const RANGE_MAX: f32 = 100.0;
const FALLOFF_STEP: f32 = 5.0;
const FALLOFF_MIN: f32 = 1.0;
const FALLOFF_MAX: f32 = 100.0;

/// Nudge `value` by `step` along a key axis and clamp to `[min, max]`.
/// Returns whether a key of the pair was held.
fn nudge(
    value: &mut f32,
    input: &InputState,
    keys: (KeyCode, KeyCode),
    step: f32,
    (min, max): (f32, f32),
) -> bool {
    let axis = input.axis(keys.0, keys.1);
    if axis == 0.0 {
        return false;
    }
    *value = (*value + axis * step).clamp(min, max);
    true
}

/// Nudge a vector with three key pairs in (x, y, z) order.
fn nudge_vec3(
    value: &mut Vec3,
    input: &InputState,
    keys: [(KeyCode, KeyCode); 3],
    step: f32,
    limit: f32,
) -> bool {
    let range = (-limit, limit);
    let x = nudge(&mut value.x, input, keys[0], step, range);
    let y = nudge(&mut value.y, input, keys[1], step, range);
    let z = nudge(&mut value.z, input, keys[2], step, range);
    x || y || z
}

/// D/A, Q/E, W/S
const MOVE_KEYS: [(KeyCode, KeyCode); 3] = [
    (KeyCode::KeyD, KeyCode::KeyA),
    (KeyCode::KeyQ, KeyCode::KeyE),
    (KeyCode::KeyW, KeyCode::KeyS),
];

/// L/J, U/O, I/K
const AIM_KEYS: [(KeyCode, KeyCode); 3] = [
    (KeyCode::KeyL, KeyCode::KeyJ),
    (KeyCode::KeyU, KeyCode::KeyO),
    (KeyCode::KeyI, KeyCode::KeyK),
];

const RANGE_KEYS: (KeyCode, KeyCode) = (KeyCode::ArrowUp, KeyCode::ArrowDown);
const FALLOFF_KEYS: (KeyCode, KeyCode) = (KeyCode::ArrowRight, KeyCode::ArrowLeft);

/// Live, user-editable parameters of the three demo lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub directional_direction: Vec3,
    pub point_position: Vec3,
    pub point_range: f32,
    pub spot_position: Vec3,
    pub spot_direction: Vec3,
    pub spot_range: f32,
    pub spot_falloff: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            directional_direction: Vec3::new(0.0, -1.0, 0.0),
            point_position: Vec3::new(0.0, 5.0, 0.0),
            point_range: 20.0,
            spot_position: Vec3::ZERO,
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_range: 10.0,
            spot_falloff: 25.0,
        }
    }
}

impl LightRig {
    /// The demo light set built from the rig: directional (on), point (off),
    /// spot (off), in the slot order [`ControlMode::light_slot`] expects.
    pub fn demo_lights(&self) -> SceneResult<LightSet> {
        let ambient = Vec3::splat(0.01);
        let lights = [
            Light::directional(self.directional_direction).with_colors(Vec3::ONE, ambient),
            Light::point(self.point_position, self.point_range)
                .with_colors(Vec3::ONE, ambient)
                .with_enabled(false),
            Light::spot(
                self.spot_position,
                self.spot_direction,
                self.spot_range,
                self.spot_falloff,
            )
            .with_colors(Vec3::ONE, ambient)
            .with_intensity(10.0)
            .with_enabled(false),
        ];

        let mut set = LightSet::new();
        for light in lights {
            set.push(light)?;
        }
        Ok(set)
    }

    /// Apply one frame of key input to the light selected by `mode`.
    ///
    /// Returns `true` when the directional light direction changed, which
    /// invalidates the shadow view.
    pub fn light_control(&mut self, dt: f32, input: &InputState, mode: ControlMode) -> bool {
        match mode {
            ControlMode::Camera => false,
            ControlMode::MoveDirectional => nudge_vec3(
                &mut self.directional_direction,
                input,
                MOVE_KEYS,
                DIRECTION_STEP * dt,
                DIRECTION_LIMIT,
            ),
            ControlMode::MovePoint => {
                nudge_vec3(
                    &mut self.point_position,
                    input,
                    MOVE_KEYS,
                    POSITION_STEP * dt,
                    POSITION_LIMIT,
                );
                nudge(
                    &mut self.point_range,
                    input,
                    RANGE_KEYS,
                    RANGE_STEP * dt,
                    (0.0, RANGE_MAX),
                );
                false
            }
            ControlMode::MoveSpot => {
                nudge_vec3(
                    &mut self.spot_position,
                    input,
                    MOVE_KEYS,
                    POSITION_STEP * dt,
                    POSITION_LIMIT,
                );
                nudge_vec3(
                    &mut self.spot_direction,
                    input,
                    AIM_KEYS,
                    DIRECTION_STEP * dt,
                    DIRECTION_LIMIT,
                );
                nudge(
                    &mut self.spot_range,
                    input,
                    RANGE_KEYS,
                    RANGE_STEP * dt,
                    (0.0, RANGE_MAX),
                );
                nudge(
                    &mut self.spot_falloff,
                    input,
                    FALLOFF_KEYS,
                    FALLOFF_STEP * dt,
                    (FALLOFF_MIN, FALLOFF_MAX),
                );
                false
            }
        }
    }

    /// Copy the rig fields of `mode`'s light into its light-set slot.
    ///
    /// Camera mode and slots past the end of `lights` do nothing.
    pub fn update_lights(&self, mode: ControlMode, lights: &mut LightSet) {
        let Some(light) = mode.light_slot().and_then(|slot| lights.get_mut(slot)) else {
            return;
        };

        match mode {
            ControlMode::Camera => {}
            ControlMode::MoveDirectional => {
                light.direction = self.directional_direction;
            }
            ControlMode::MovePoint => {
                light.position = self.point_position;
                light.range = self.point_range;
            }
            ControlMode::MoveSpot => {
                light.position = self.spot_position;
                light.direction = self.spot_direction;
                light.spot_falloff = self.spot_falloff;
                light.range = self.spot_range;
            }
        }
    }
}
