//! Accumulated input for a character controller.
//!
//! The routing observer writes into the intent of whichever entity owns the
//! stream an event arrived on; movement and look systems read it. A cancel
//! event zeroes the matching field at once, independent of frame cadence.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    /// Planar stick: `x` strafes right, `y` moves forward.
    pub movement: Vec2,
    /// `x` yaws, `y` pitches.
    pub look: Vec2,
    /// Flight axis in `[-1, 1]`, ghost only.
    pub vertical: f32,
    /// Jump requested; consumed by the next physics step.
    pub jump: bool,
    /// Sprint toggle, explorer only.
    pub sprint: bool,
}

impl ControlIntent {
    /// Drop everything, including latched toggles.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
