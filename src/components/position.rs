//! World-space position of an entity's pivot.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// World-space position. For capsule bodies this is the capsule centre.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub pos: Vec3,
}

impl Position {
    pub fn distance(&self, other: &Position) -> f32 {
        self.pos.distance(other.pos)
    }
}
