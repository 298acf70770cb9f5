//! Connected gamepads as enumerated by the host.

use bevy_ecs::prelude::Resource;

use crate::resources::routing::DeviceId;

/// Gamepads available at startup, in host enumeration order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConnectedDevices {
    pub gamepads: Vec<DeviceId>,
}

impl ConnectedDevices {
    pub fn new(gamepads: Vec<DeviceId>) -> Self {
        Self { gamepads }
    }

    /// `count` gamepads numbered from zero, for headless runs.
    pub fn simulated(count: u32) -> Self {
        Self {
            gamepads: (0..count).map(DeviceId).collect(),
        }
    }
}
