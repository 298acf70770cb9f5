//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and pushes the tunables into the live
//! components and the clock. Runs first in the frame schedule so every other
//! system sees the values of the current frame.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::camerapivot::CameraPivot;
use crate::components::explorer::{Explorer, ExplorerTuning};
use crate::components::fear::Fear;
use crate::components::ghost::{Ghost, GhostTuning};
use crate::components::possession::Possessor;
use crate::components::rigidbody::{GRAVITY_FORCE, RigidBody};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Apply [`GameConfig`] when it was added or modified.
///
/// Fear capacity is updated but the current fear value is kept (clamped);
/// the configured starting fear only applies at spawn.
#[allow(clippy::type_complexity)]
pub fn apply_gameconfig_changes(
    config: Res<GameConfig>,
    mut time: ResMut<WorldTime>,
    mut ghosts: Query<
        (
            &mut GhostTuning,
            Option<&mut Possessor>,
            &mut Fear,
            &mut CameraPivot,
        ),
        With<Ghost>,
    >,
    mut explorers: Query<
        (&mut ExplorerTuning, &mut RigidBody, &mut CameraPivot),
        (With<Explorer>, Without<Ghost>),
    >,
) {
    if !config.is_changed() {
        return;
    }
    time.fixed_delta = config.fixed_timestep;

    for (mut tuning, possessor, mut fear, mut pivot) in ghosts.iter_mut() {
        *tuning = config.ghost_tuning();
        if let Some(mut possessor) = possessor {
            possessor.tuning = config.possession_tuning();
        }
        fear.set_max(config.ghost_max_fear);
        pivot.sensitivity = config.ghost_look_sensitivity;
    }
    for (mut tuning, mut body, mut pivot) in explorers.iter_mut() {
        *tuning = config.explorer_tuning();
        body.add_force(GRAVITY_FORCE, Vec3::new(0.0, config.gravity, 0.0));
        pivot.sensitivity = config.explorer_look_sensitivity;
    }
    info!("GameConfig changes applied.");
}
