//! Cosmetic state read by a renderer.
//!
//! Nothing in the gameplay core reads these values; they are written by the
//! presentation observers after a phase or possession change.

use bevy_ecs::prelude::Component;

/// Opacity while phasing.
pub const PHASING_ALPHA: f32 = 0.4;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub alpha: f32,
    pub visible: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            visible: true,
        }
    }
}
