//! Child camera pivot holding the look pitch.

use bevy_ecs::prelude::Component;
use glam::Quat;

/// Pitch is clamped to this many degrees either side of level.
pub const MAX_PITCH_DEGREES: f32 = 80.0;

/// Camera attached to a body. Pitch never rotates the body itself.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CameraPivot {
    /// Degrees; positive looks down.
    pub pitch_degrees: f32,
    /// Degrees of rotation per unit of look input.
    pub sensitivity: f32,
    pub enabled: bool,
}

impl CameraPivot {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            pitch_degrees: 0.0,
            sensitivity,
            enabled: true,
        }
    }

    /// Accumulate pitch from vertical look input, keeping it within the clamp.
    pub fn apply_pitch(&mut self, look_y: f32) {
        self.pitch_degrees = (self.pitch_degrees - look_y * self.sensitivity)
            .clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES);
    }

    /// Rotation of the pivot relative to its body.
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch_degrees.to_radians())
    }
}
