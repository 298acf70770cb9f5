//! Cosmetic reactions to ability changes.
//!
//! These observers run after a transition has been applied and never feed
//! back into gameplay state.

use bevy_ecs::prelude::*;

use crate::components::camerapivot::CameraPivot;
use crate::components::presentation::{PHASING_ALPHA, Presentation};
use crate::components::possession::PossessionState;
use crate::events::phase::PhaseChanged;
use crate::events::possession::PossessionChanged;

/// Fade a phasing ghost.
pub fn phase_presentation_observer(
    trigger: On<PhaseChanged>,
    mut presentations: Query<&mut Presentation>,
) {
    let event = trigger.event();
    if let Ok(mut presentation) = presentations.get_mut(event.entity) {
        presentation.alpha = if event.state.is_phasing() {
            PHASING_ALPHA
        } else {
            1.0
        };
    }
}

/// Hide a possessing ghost and switch its camera off; restore both on exit.
pub fn possession_presentation_observer(
    trigger: On<PossessionChanged>,
    mut presentations: Query<&mut Presentation>,
    mut cameras: Query<&mut CameraPivot>,
) {
    let event = trigger.event();
    let active = event.state == PossessionState::Unpossessed;
    if let Ok(mut presentation) = presentations.get_mut(event.ghost) {
        presentation.visible = active;
    }
    if let Ok(mut camera) = cameras.get_mut(event.ghost) {
        camera.enabled = active;
    }
    if let Ok(mut camera) = cameras.get_mut(event.explorer) {
        camera.enabled = true;
    }
}
