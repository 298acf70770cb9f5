//! Body yaw.
//!
//! Only yaw rotates the body; pitch lives on the
//! [`CameraPivot`](super::camerapivot::CameraPivot).

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// Yaw around the world up axis, in degrees. Positive turns right.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_rotation_y(self.degrees.to_radians())
    }

    /// Planar forward direction. Yaw 0 faces +Z.
    pub fn forward(&self) -> Vec3 {
        self.quat() * Vec3::Z
    }

    /// Planar right direction. Yaw 0 has right at +X.
    pub fn right(&self) -> Vec3 {
        self.quat() * Vec3::X
    }

    /// Turn by `degrees`, keeping the angle in `[0, 360)`.
    pub fn yaw(&mut self, degrees: f32) {
        self.degrees = (self.degrees + degrees).rem_euclid(360.0);
    }

    /// World-space direction for a planar stick value (`x` strafes, `y` advances).
    pub fn planar(&self, stick: glam::Vec2) -> Vec3 {
        self.forward() * stick.y + self.right() * stick.x
    }
}
