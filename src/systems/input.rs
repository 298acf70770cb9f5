//! Action routing.
//!
//! Every [`ActionEvent`] is resolved device -> stream -> owner before it
//! touches any controller. Events on unbound devices or disabled streams are
//! dropped. Cancel events zero the matching intent field right away.
//!
//! The possess button is special: it always goes to the stream's home owner,
//! which keeps it working for the ghost player while their stream drives the
//! explorer.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::controlintent::ControlIntent;
use crate::events::input::{ActionEvent, ActionPhase, PlayerAction};
use crate::events::phase::PhaseToggleRequest;
use crate::events::possession::PossessionToggleRequest;
use crate::resources::routing::{InputRouting, StreamOwner};

pub fn route_action_event(
    trigger: On<ActionEvent>,
    routing: Res<InputRouting>,
    mut intents: Query<&mut ControlIntent>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Some(stream) = routing
        .stream_for_device(event.device)
        .and_then(|id| routing.stream(id))
    else {
        trace!("Dropping {:?} from unbound {:?}", event.action, event.device);
        return;
    };
    if !stream.enabled {
        trace!("Dropping {:?} on a disabled stream", event.action);
        return;
    }

    let performed = event.phase == ActionPhase::Performed;

    if event.action == PlayerAction::Possess {
        if let (true, StreamOwner::Ghost(ghost)) = (performed, stream.home) {
            commands.trigger(PossessionToggleRequest { ghost });
        }
        return;
    }

    let owner = stream.owner;
    let Some(entity) = owner.entity() else {
        return;
    };
    let is_ghost = matches!(owner, StreamOwner::Ghost(_));
    let Ok(mut intent) = intents.get_mut(entity) else {
        return;
    };

    match (event.action, performed) {
        (PlayerAction::Movement, true) => intent.movement = event.value.as_vec2(),
        (PlayerAction::Movement, false) => intent.movement = Vec2::ZERO,
        (PlayerAction::Look, true) => intent.look = event.value.as_vec2(),
        (PlayerAction::Look, false) => intent.look = Vec2::ZERO,
        (PlayerAction::FlyUp, true) if is_ghost => intent.vertical = event.value.as_axis(),
        (PlayerAction::FlyDown, true) if is_ghost => intent.vertical = -event.value.as_axis(),
        (PlayerAction::FlyUp | PlayerAction::FlyDown, false) if is_ghost => intent.vertical = 0.0,
        (PlayerAction::PhaseToggle, true) if is_ghost => {
            commands.trigger(PhaseToggleRequest { ghost: entity });
        }
        (PlayerAction::Jump, true) if !is_ghost => intent.jump = true,
        (PlayerAction::Sprint, true) if !is_ghost => intent.sprint = !intent.sprint,
        _ => {}
    }
}
