//! Per-frame look handling.
//!
//! Yaw turns the body; pitch accumulates on the camera pivot only. Look input
//! is applied per frame, not scaled by delta, matching stick-to-degrees
//! sensitivity.

use bevy_ecs::prelude::*;

use crate::components::camerapivot::CameraPivot;
use crate::components::controlintent::ControlIntent;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;

pub fn look_system(
    mut query: Query<(
        &ControlIntent,
        &mut Rotation,
        &mut CameraPivot,
        Option<&RigidBody>,
    )>,
) {
    for (intent, mut rotation, mut pivot, body) in query.iter_mut() {
        if body.is_some_and(|b| b.frozen) || intent.look == glam::Vec2::ZERO {
            continue;
        }
        rotation.yaw(intent.look.x * pivot.sensitivity);
        pivot.apply_pitch(intent.look.y);
    }
}
