//! Phase state of a ghost and the rules for toggling it.
//!
//! [`plan_toggle`] is the transition table: it decides, from the current state
//! and gauge alone, what a toggle request would do. Applying the decision
//! (spending fear, swapping layers, pushing out of geometry) is the job of
//! [`crate::systems::phasing`].

use bevy_ecs::prelude::Component;
use std::fmt;

use crate::components::fear::Fear;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    Solid,
    Phasing,
}

impl PhaseState {
    pub fn is_phasing(self) -> bool {
        self == PhaseState::Phasing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    Enter,
    Exit,
}

/// Why a Solid -> Phasing toggle was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseRejection {
    /// Phasing is unavailable while piloting another body.
    Possessing,
    /// The gauge is empty.
    NoFear,
    CannotAfford { have: f32, cost: f32 },
}

impl fmt::Display for PhaseRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseRejection::Possessing => write!(f, "cannot phase while possessing"),
            PhaseRejection::NoFear => write!(f, "no fear left"),
            PhaseRejection::CannotAfford { have, cost } => {
                write!(f, "phasing costs {cost}, only {have} fear left")
            }
        }
    }
}

/// Decide what a phase toggle does.
///
/// Leaving the phase is always allowed. Entering needs a non-empty gauge that
/// covers `cost`, and no active possession.
pub fn plan_toggle(
    state: PhaseState,
    fear: &Fear,
    cost: f32,
    possessing: bool,
) -> Result<PhaseTransition, PhaseRejection> {
    match state {
        PhaseState::Phasing => Ok(PhaseTransition::Exit),
        PhaseState::Solid if possessing => Err(PhaseRejection::Possessing),
        PhaseState::Solid if fear.is_empty() => Err(PhaseRejection::NoFear),
        PhaseState::Solid if fear.value() < cost => Err(PhaseRejection::CannotAfford {
            have: fear.value(),
            cost,
        }),
        PhaseState::Solid => Ok(PhaseTransition::Enter),
    }
}
