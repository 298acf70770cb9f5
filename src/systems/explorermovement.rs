//! Explorer walking, jumping and falling.
//!
//! Horizontal and vertical motion are resolved separately each physics step:
//! the walk is dropped for the step if it would hit something, the fall
//! stops at the first contact.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::capsulecollider::CapsuleCollider;
use crate::components::collisionlayer::CollisionLayer;
use crate::components::controlintent::ControlIntent;
use crate::components::explorer::{Explorer, ExplorerMotion, ExplorerTuning};
use crate::components::ghost::Ghost;
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::physics::capsule_cast;
use crate::resources::collisionlayers::CollisionLayers;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{ObstacleQuery, obstacle_shapes};

/// How far below the capsule ground contact is looked for.
pub const GROUND_PROBE_DISTANCE: f32 = 0.05;
/// Vertical speed a grounded body is held at so it stays in contact.
pub const GROUNDED_VELOCITY: f32 = -2.0;

#[allow(clippy::type_complexity)]
pub fn explorer_movement(
    time: Res<WorldTime>,
    layers: Res<CollisionLayers>,
    mut explorers: Query<
        (
            &mut Position,
            &Rotation,
            &mut ControlIntent,
            &ExplorerTuning,
            &mut ExplorerMotion,
            &CapsuleCollider,
            &CollisionLayer,
            &mut RigidBody,
        ),
        (With<Explorer>, Without<Ghost>),
    >,
    obstacles: ObstacleQuery,
) {
    let dt = time.fixed_delta;
    let shapes = obstacle_shapes(&obstacles);
    for (mut position, rotation, mut intent, tuning, mut motion, capsule, layer, mut body) in
        explorers.iter_mut()
    {
        if body.frozen {
            continue;
        }
        let mask = layers.collision_mask(layer.0);

        let walk = rotation.planar(intent.movement) * tuning.speed(intent.sprint) * dt;
        if walk != Vec3::ZERO
            && capsule_cast(&capsule.at(position.pos), walk, &shapes, mask).is_none()
        {
            position.pos += walk;
        }

        motion.grounded = capsule_cast(
            &capsule.at(position.pos),
            Vec3::NEG_Y * GROUND_PROBE_DISTANCE,
            &shapes,
            mask,
        )
        .is_some();
        if motion.grounded && body.velocity.y < 0.0 {
            body.velocity.y = GROUNDED_VELOCITY;
        }
        if intent.jump {
            if motion.grounded {
                body.velocity.y = tuning.jump_velocity();
            }
            intent.jump = false;
        }

        let acceleration = body.total_acceleration();
        body.velocity.y += acceleration.y * dt;
        let fall = Vec3::Y * body.velocity.y * dt;
        if fall == Vec3::ZERO {
            continue;
        }
        match capsule_cast(&capsule.at(position.pos), fall, &shapes, mask) {
            Some(hit) => {
                position.pos += fall.normalize() * hit.distance;
                if body.velocity.y > 0.0 {
                    // Head bump.
                    body.velocity.y = 0.0;
                }
            }
            None => position.pos += fall,
        }
    }
}
