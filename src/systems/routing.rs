//! Startup device binding.
//!
//! Registered as a one-shot system and run once the explorer and ghost exist.
//! With fewer than two gamepads the error is logged and nothing is bound:
//! both characters stay uncontrolled and possession is unavailable, but the
//! rest of the simulation keeps running.

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::explorer::Explorer;
use crate::components::ghost::Ghost;
use crate::resources::devices::ConnectedDevices;
use crate::resources::routing::InputRouting;

pub fn bind_player_devices(
    devices: Res<ConnectedDevices>,
    mut routing: ResMut<InputRouting>,
    explorers: Query<Entity, (With<Explorer>, Without<Ghost>)>,
    ghosts: Query<Entity, With<Ghost>>,
) {
    let (Ok(explorer), Ok(ghost)) = (explorers.single(), ghosts.single()) else {
        error!("Device binding needs exactly one explorer and one ghost");
        return;
    };
    match routing.bind_devices(&devices.gamepads, explorer, ghost) {
        Ok((explorer_stream, ghost_stream)) => info!(
            "Input ready: explorer on {:?}, ghost on {:?}",
            explorer_stream, ghost_stream
        ),
        Err(e) => error!("{}; running without player input", e),
    }
}
