//! Possession toggle request and change notification.

use bevy_ecs::prelude::*;

use crate::components::possession::PossessionState;

/// Ask the possession observer to start or end a possession for `ghost`.
#[derive(Event, Debug, Clone, Copy)]
pub struct PossessionToggleRequest {
    pub ghost: Entity,
}

/// Triggered after a possession started or ended.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PossessionChanged {
    pub ghost: Entity,
    pub explorer: Entity,
    pub state: PossessionState,
    /// True when fear exhaustion ended the possession.
    pub forced: bool,
}
