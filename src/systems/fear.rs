//! Per-frame fear upkeep.
//!
//! This is the only place fear drains over time. Possession drains at the
//! possessor's rate, phasing at the ghost's phase drain rate, and an idle
//! solid ghost regenerates. When the gauge runs dry the matching ability is
//! forced off through the same path a manual toggle takes.

use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::resources::worldtime::WorldTime;
use crate::systems::abilities::AbilityContext;

pub fn fear_system(time: Res<WorldTime>, mut abilities: AbilityContext) {
    let dt = time.delta;
    let mut out_of_phase: SmallVec<[Entity; 2]> = SmallVec::new();
    let mut out_of_body: SmallVec<[Entity; 2]> = SmallVec::new();

    for (entity, mut fear, state, possessor, tuning, ..) in abilities.ghosts.iter_mut() {
        let possession = possessor
            .as_ref()
            .filter(|p| p.is_possessing())
            .map(|p| p.tuning.drain_rate);
        if let Some(rate) = possession {
            fear.drain(rate, dt);
            if fear.is_empty() {
                out_of_body.push(entity);
            }
        } else if state.is_phasing() {
            fear.drain(tuning.fear_drain_rate, dt);
            if fear.is_empty() {
                out_of_phase.push(entity);
            }
        } else if tuning.fear_regen_rate > 0.0 && fear.value() < fear.max() {
            fear.regen(tuning.fear_regen_rate, dt);
        }
    }

    for ghost in out_of_phase {
        abilities.exit_phase(ghost, true);
    }
    for ghost in out_of_body {
        abilities.end_possession(ghost, true);
    }
}
