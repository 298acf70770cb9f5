//! Phase toggle request and change notification.
//!
//! [`PhaseToggleRequest`] asks the phasing observer to flip a ghost's state;
//! it may be refused. [`PhaseChanged`] is triggered only after a transition
//! has been applied, and is what presentation observers listen to.
//!
//! ```ignore
//! fn on_phase_changed(trigger: On<PhaseChanged>) {
//!     let event = trigger.event();
//!     log::info!("{:?} is now {:?}", event.entity, event.state);
//! }
//! world.add_observer(on_phase_changed);
//! ```

use bevy_ecs::prelude::*;

use crate::components::phasing::PhaseState;

#[derive(Event, Debug, Clone, Copy)]
pub struct PhaseToggleRequest {
    pub ghost: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PhaseChanged {
    pub entity: Entity,
    /// State after the transition.
    pub state: PhaseState,
    /// True when the exit was forced (fear ran out or possession started).
    pub forced: bool,
}
