//! Possession toggle observer.
//!
//! The possess button is routed by the stream's home owner, so this fires
//! for the ghost player both while they fly and while they pilot the
//! explorer. Start and end logic lives in
//! [`AbilityContext`](crate::systems::abilities::AbilityContext).

use bevy_ecs::prelude::*;

use crate::events::possession::PossessionToggleRequest;
use crate::systems::abilities::AbilityContext;

pub fn possession_toggle_observer(
    trigger: On<PossessionToggleRequest>,
    mut abilities: AbilityContext,
) {
    abilities.toggle_possession(trigger.event().ghost);
}
