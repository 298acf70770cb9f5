//! Ghost ability transitions.
//!
//! [`AbilityContext`] bundles everything a phase or possession transition
//! touches: the ghost's own components, the explorer it may take over, the
//! level geometry for push-out, the layer matrix and the input routing table.
//! Manual toggles (observers) and forced exits (the fear system) both go
//! through the same methods, so a forced exit is indistinguishable from a
//! manual one apart from the `forced` flag on the change event.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, error, info, warn};

use crate::components::capsulecollider::CapsuleCollider;
use crate::components::collisionlayer::{CollisionLayer, PhaseLayers};
use crate::components::controlintent::ControlIntent;
use crate::components::explorer::Explorer;
use crate::components::fear::Fear;
use crate::components::ghost::{Ghost, GhostTuning};
use crate::components::phasing::{PhaseState, PhaseTransition, plan_toggle};
use crate::components::position::Position;
use crate::components::possession::{PossessionState, PossessionTransition, Possessor};
use crate::components::rigidbody::RigidBody;
use crate::events::phase::PhaseChanged;
use crate::events::possession::PossessionChanged;
use crate::resources::collisionlayers::CollisionLayers;
use crate::resources::routing::{InputRouting, StreamOwner};
use crate::systems::collision::{ObstacleQuery, obstacle_shapes};
use crate::systems::phasing::{enter_phase, exit_phase};

/// Components of a ghost that ability transitions read or write.
pub type GhostAbilityData = (
    Entity,
    &'static mut Fear,
    &'static mut PhaseState,
    Option<&'static mut Possessor>,
    &'static GhostTuning,
    &'static mut Position,
    &'static CapsuleCollider,
    &'static mut CollisionLayer,
    &'static PhaseLayers,
    &'static mut RigidBody,
    &'static mut ControlIntent,
);

#[derive(SystemParam)]
pub struct AbilityContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub ghosts: Query<'w, 's, GhostAbilityData, With<Ghost>>,
    pub explorers: Query<
        'w,
        's,
        (&'static Position, &'static mut ControlIntent),
        (With<Explorer>, Without<Ghost>),
    >,
    pub obstacles: ObstacleQuery<'w, 's>,
    pub layers: Res<'w, CollisionLayers>,
    pub routing: ResMut<'w, InputRouting>,
}

impl AbilityContext<'_, '_> {
    /// Flip the ghost between solid and phasing if the guard allows it.
    pub fn toggle_phase(&mut self, ghost: Entity) {
        let plan = {
            let Ok((_, fear, state, possessor, tuning, ..)) = self.ghosts.get(ghost) else {
                warn!("Phase toggle for {:?}, which is not a ghost", ghost);
                return;
            };
            let possessing = possessor.is_some_and(|p| p.is_possessing());
            plan_toggle(*state, fear, tuning.phase_cost, possessing)
        };
        match plan {
            Ok(PhaseTransition::Enter) => self.enter_phase(ghost),
            Ok(PhaseTransition::Exit) => {
                self.exit_phase(ghost, false);
            }
            Err(rejection) => debug!("{:?} stays solid: {}", ghost, rejection),
        }
    }

    fn enter_phase(&mut self, ghost: Entity) {
        let Ok((_, mut fear, mut state, _, tuning, _, _, mut layer, phase_layers, _, _)) =
            self.ghosts.get_mut(ghost)
        else {
            return;
        };
        enter_phase(
            &mut state,
            &mut fear,
            tuning.phase_cost,
            &mut layer,
            phase_layers,
        );
        info!("Ghost {:?} is phasing (fear {:.1})", ghost, fear.value());
        self.commands.trigger(PhaseChanged {
            entity: ghost,
            state: PhaseState::Phasing,
            forced: false,
        });
    }

    /// Return a phasing ghost to solid. No-op (returns false) when already solid.
    pub fn exit_phase(&mut self, ghost: Entity, forced: bool) -> bool {
        let shapes = obstacle_shapes(&self.obstacles);
        let Ok((_, _, mut state, _, _, mut position, capsule, mut layer, phase_layers, _, _)) =
            self.ghosts.get_mut(ghost)
        else {
            return false;
        };
        if !state.is_phasing() {
            return false;
        }
        exit_phase(
            &mut state,
            &mut position,
            capsule,
            &mut layer,
            phase_layers,
            &self.layers,
            &shapes,
        );
        info!(
            "Ghost {:?} is solid again{}",
            ghost,
            if forced { " (forced)" } else { "" }
        );
        self.commands.trigger(PhaseChanged {
            entity: ghost,
            state: PhaseState::Solid,
            forced,
        });
        true
    }

    /// Start or end a possession if the guard allows it.
    pub fn toggle_possession(&mut self, ghost: Entity) {
        let plan = {
            let Ok((_, fear, _, possessor, _, position, ..)) = self.ghosts.get(ghost) else {
                warn!("Possession toggle for {:?}, which is not a ghost", ghost);
                return;
            };
            let Some(possessor) = possessor else {
                debug!("Ghost {:?} has nothing to possess", ghost);
                return;
            };
            let Ok((target_position, _)) = self.explorers.get(possessor.target) else {
                warn!(
                    "Possession target {:?} of {:?} is not an explorer",
                    possessor.target, ghost
                );
                return;
            };
            possessor.plan_toggle(fear, position.distance(target_position))
        };
        match plan {
            Ok(PossessionTransition::Start) => {
                self.start_possession(ghost);
            }
            Ok(PossessionTransition::End) => {
                self.end_possession(ghost, false);
            }
            Err(rejection) => debug!("{:?} cannot possess: {}", ghost, rejection),
        }
    }

    /// Hand the ghost's stream to the explorer and park the ghost's body.
    pub fn start_possession(&mut self, ghost: Entity) -> bool {
        let Some(ghost_stream) = self.routing.stream_owned_by(ghost) else {
            warn!("Ghost {:?} owns no input stream, possession unavailable", ghost);
            return false;
        };
        // Phasing is unavailable while piloting another body.
        self.exit_phase(ghost, true);

        let Ok((_, _, _, Some(mut possessor), _, _, _, _, _, mut body, mut intent)) =
            self.ghosts.get_mut(ghost)
        else {
            return false;
        };
        if possessor.is_possessing() {
            return false;
        }
        let explorer = possessor.target;
        if let Err(e) = self
            .routing
            .take_control(ghost_stream, StreamOwner::Explorer(explorer))
        {
            error!("Possession aborted: {}", e);
            return false;
        }
        possessor.state = PossessionState::Possessing;
        intent.clear();
        body.freeze();
        if let Ok((_, mut explorer_intent)) = self.explorers.get_mut(explorer) {
            explorer_intent.clear();
        }
        info!("Ghost {:?} is now possessing explorer {:?}", ghost, explorer);
        self.commands.trigger(PossessionChanged {
            ghost,
            explorer,
            state: PossessionState::Possessing,
            forced: false,
        });
        true
    }

    /// Give both players their own streams back and wake the ghost's body.
    pub fn end_possession(&mut self, ghost: Entity, forced: bool) -> bool {
        let Ok((_, _, _, Some(mut possessor), _, _, _, _, _, mut body, mut intent)) =
            self.ghosts.get_mut(ghost)
        else {
            return false;
        };
        if !possessor.is_possessing() {
            return false;
        }
        let explorer = possessor.target;

        // The ghost's stream goes straight from the explorer to the ghost, so
        // it is never left without an owner.
        match self.routing.home_stream_of(ghost) {
            Some(stream) => {
                if let Err(e) = self.routing.assign_input(stream, ghost) {
                    error!("Could not return input to ghost {:?}: {}", ghost, e);
                }
            }
            None => warn!("Ghost {:?} has no home stream", ghost),
        }
        match self.routing.home_stream_of(explorer) {
            Some(stream) => {
                if let Err(e) = self
                    .routing
                    .take_control(stream, StreamOwner::Explorer(explorer))
                {
                    error!("Could not return input to explorer {:?}: {}", explorer, e);
                }
            }
            None => warn!("Explorer {:?} has no home stream", explorer),
        }

        possessor.state = PossessionState::Unpossessed;
        body.unfreeze();
        intent.clear();
        if let Ok((_, mut explorer_intent)) = self.explorers.get_mut(explorer) {
            explorer_intent.clear();
        }
        info!(
            "Ghost {:?} has left explorer {:?}{}",
            ghost,
            explorer,
            if forced { " (out of fear)" } else { "" }
        );
        self.commands.trigger(PossessionChanged {
            ghost,
            explorer,
            state: PossessionState::Unpossessed,
            forced,
        });
        true
    }
}
