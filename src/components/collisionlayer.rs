//! Per-entity collision layer assignment.

use bevy_ecs::prelude::Component;

use crate::resources::collisionlayers::Layer;

/// The layer this entity currently occupies. Queries issued for the entity
/// only see layers that collide with it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer(pub Layer);

/// The two layers a phasing-capable entity switches between.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLayers {
    pub solid: Layer,
    pub phasing: Layer,
}
