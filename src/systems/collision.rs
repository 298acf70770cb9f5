//! Collision geometry gathered from the world.
//!
//! Obstacles are static boxes. Systems that move characters take an
//! [`ObstacleQuery`] and snapshot it with [`obstacle_shapes`] before running
//! any capsule query from [`crate::physics`].

use bevy_ecs::prelude::*;

use crate::components::boxcollider::{BoxCollider, Obstacle};
use crate::components::collisionlayer::CollisionLayer;
use crate::components::explorer::Explorer;
use crate::components::ghost::Ghost;
use crate::components::position::Position;
use crate::physics::ObstacleShape;

/// Read-only view of every obstacle. Filtered away from characters so it can
/// sit next to queries that move them.
pub type ObstacleQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Position,
        &'static BoxCollider,
        &'static CollisionLayer,
    ),
    (With<Obstacle>, Without<Ghost>, Without<Explorer>),
>;

pub fn obstacle_shapes(obstacles: &ObstacleQuery) -> Vec<ObstacleShape> {
    obstacles
        .iter()
        .map(|(entity, position, collider, layer)| ObstacleShape {
            entity,
            aabb: collider.aabb(position.pos),
            layer: layer.0,
        })
        .collect()
}
