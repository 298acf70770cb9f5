//! Entering and leaving the phase.
//!
//! The transitions themselves are plain functions over the ghost's
//! components so they can be shared by the toggle observer and the forced
//! exit in [`crate::systems::fear`]. Both go through
//! [`AbilityContext`](crate::systems::abilities::AbilityContext).

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::capsulecollider::CapsuleCollider;
use crate::components::collisionlayer::{CollisionLayer, PhaseLayers};
use crate::components::fear::Fear;
use crate::components::phasing::PhaseState;
use crate::components::position::Position;
use crate::events::phase::PhaseToggleRequest;
use crate::physics::{ObstacleShape, overlap_capsule, push_out};
use crate::resources::collisionlayers::CollisionLayers;
use crate::systems::abilities::AbilityContext;

/// Solid -> Phasing. The caller has already checked the guard.
pub fn enter_phase(
    state: &mut PhaseState,
    fear: &mut Fear,
    cost: f32,
    layer: &mut CollisionLayer,
    phase_layers: &PhaseLayers,
) {
    fear.spend(cost);
    *state = PhaseState::Phasing;
    layer.0 = phase_layers.phasing;
}

/// Phasing -> Solid, pushing the body out of anything solid it ended up in.
///
/// Runs a single push-out pass against every layer the solid layer collides
/// with, then restores the solid layer. Returns the displacement applied.
#[allow(clippy::too_many_arguments)]
pub fn exit_phase(
    state: &mut PhaseState,
    position: &mut Position,
    capsule: &CapsuleCollider,
    layer: &mut CollisionLayer,
    phase_layers: &PhaseLayers,
    layers: &CollisionLayers,
    obstacles: &[ObstacleShape],
) -> Vec3 {
    let mask = layers.collision_mask(phase_layers.solid);
    let overlaps = overlap_capsule(&capsule.at(position.pos), obstacles, mask);
    let push = push_out(&overlaps);
    if !overlaps.is_empty() {
        debug!(
            "Phase exit overlapped {} collider(s), pushing by {:?}",
            overlaps.len(),
            push
        );
    }
    position.pos += push;
    layer.0 = phase_layers.solid;
    *state = PhaseState::Solid;
    push
}

pub fn phase_toggle_observer(trigger: On<PhaseToggleRequest>, mut abilities: AbilityContext) {
    abilities.toggle_phase(trigger.event().ghost);
}
