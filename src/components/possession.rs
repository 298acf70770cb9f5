//! Possession state held by the ghost.
//!
//! A [`Possessor`] remembers which explorer the ghost can take over, whether
//! it currently does, and the tunables that gate and drain the possession.

use bevy_ecs::prelude::*;
use std::fmt;

use crate::components::fear::Fear;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PossessionState {
    #[default]
    Unpossessed,
    Possessing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PossessionTuning {
    /// Fear needed to start possessing.
    pub required_fear: f32,
    /// Fear per second while possessing.
    pub drain_rate: f32,
    /// Maximum ghost-explorer distance to start; `None` disables the check.
    pub radius: Option<f32>,
}

impl Default for PossessionTuning {
    fn default() -> Self {
        Self {
            required_fear: 50.0,
            drain_rate: 10.0,
            radius: None,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Possessor {
    pub state: PossessionState,
    /// The explorer this ghost takes over.
    pub target: Entity,
    pub tuning: PossessionTuning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionTransition {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PossessionRejection {
    InsufficientFear { have: f32, need: f32 },
    OutOfRange { distance: f32, radius: f32 },
}

impl fmt::Display for PossessionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PossessionRejection::InsufficientFear { have, need } => {
                write!(f, "not enough fear to possess ({have} < {need})")
            }
            PossessionRejection::OutOfRange { distance, radius } => {
                write!(f, "explorer out of reach ({distance} > {radius})")
            }
        }
    }
}

impl Possessor {
    pub fn new(target: Entity, tuning: PossessionTuning) -> Self {
        Self {
            state: PossessionState::Unpossessed,
            target,
            tuning,
        }
    }

    pub fn is_possessing(&self) -> bool {
        self.state == PossessionState::Possessing
    }

    /// Decide what a possess toggle does given the gauge and the current
    /// ghost-explorer distance.
    pub fn plan_toggle(
        &self,
        fear: &Fear,
        distance: f32,
    ) -> Result<PossessionTransition, PossessionRejection> {
        if self.is_possessing() {
            return Ok(PossessionTransition::End);
        }
        if fear.value() < self.tuning.required_fear {
            return Err(PossessionRejection::InsufficientFear {
                have: fear.value(),
                need: self.tuning.required_fear,
            });
        }
        if let Some(radius) = self.tuning.radius {
            if distance > radius {
                return Err(PossessionRejection::OutOfRange { distance, radius });
            }
        }
        Ok(PossessionTransition::Start)
    }
}
