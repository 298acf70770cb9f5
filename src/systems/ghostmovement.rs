//! Ghost flight, one physics step at a time.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::capsulecollider::CapsuleCollider;
use crate::components::collisionlayer::CollisionLayer;
use crate::components::controlintent::ControlIntent;
use crate::components::ghost::{Ghost, GhostTuning};
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::physics::capsule_cast;
use crate::resources::collisionlayers::CollisionLayers;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{ObstacleQuery, obstacle_shapes};

/// Move each ghost by its planar direction times `move_speed` plus its
/// flight axis times `fly_speed`.
///
/// The whole step is cast first against the layers the ghost's current layer
/// collides with; if anything blocks, the ghost does not move this step.
/// Frozen ghosts (possessing) are skipped.
#[allow(clippy::type_complexity)]
pub fn ghost_movement(
    time: Res<WorldTime>,
    layers: Res<CollisionLayers>,
    mut ghosts: Query<
        (
            &mut Position,
            &Rotation,
            &ControlIntent,
            &GhostTuning,
            &CapsuleCollider,
            &CollisionLayer,
            &RigidBody,
        ),
        With<Ghost>,
    >,
    obstacles: ObstacleQuery,
) {
    let shapes = obstacle_shapes(&obstacles);
    for (mut position, rotation, intent, tuning, capsule, layer, body) in ghosts.iter_mut() {
        if body.frozen {
            continue;
        }
        let direction = rotation.planar(intent.movement).normalize_or_zero();
        let motion = (direction * tuning.move_speed + Vec3::Y * intent.vertical * tuning.fly_speed)
            * time.fixed_delta;
        if motion == Vec3::ZERO {
            continue;
        }
        let mask = layers.collision_mask(layer.0);
        if capsule_cast(&capsule.at(position.pos), motion, &shapes, mask).is_none() {
            position.pos += motion;
        }
    }
}
