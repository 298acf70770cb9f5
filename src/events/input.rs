//! Gamepad action events.
//!
//! The host delivers every action callback as an [`ActionEvent`] tagged with
//! the device it came from. The routing observer in
//! [`crate::systems::input`] resolves the device to its stream and the stream
//! to its current owner before anything reacts to it.
//!
//! # Usage
//!
//! ```ignore
//! world.trigger(ActionEvent::stick(DeviceId(1), PlayerAction::Movement, Vec2::Y));
//! world.trigger(ActionEvent::canceled(DeviceId(1), PlayerAction::Movement));
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::resources::routing::DeviceId;

/// Logical actions of the shared action map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    /// Left stick.
    Movement,
    /// Right stick.
    Look,
    FlyUp,
    FlyDown,
    PhaseToggle,
    /// North button. Always handled by the stream's home owner.
    Possess,
    Jump,
    /// Toggles sprinting on each press.
    Sprint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    #[default]
    Performed,
    /// The control returned to neutral.
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionValue {
    #[default]
    Button,
    Axis(f32),
    Stick(Vec2),
}

impl ActionValue {
    pub fn as_vec2(self) -> Vec2 {
        match self {
            ActionValue::Stick(v) => v,
            ActionValue::Axis(x) => Vec2::new(x, 0.0),
            ActionValue::Button => Vec2::ZERO,
        }
    }

    /// Scalar reading; buttons read as fully pressed.
    pub fn as_axis(self) -> f32 {
        match self {
            ActionValue::Axis(x) => x,
            ActionValue::Stick(v) => v.length(),
            ActionValue::Button => 1.0,
        }
    }
}

/// Event triggered for every action callback from a device.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionEvent {
    pub device: DeviceId,
    pub action: PlayerAction,
    pub phase: ActionPhase,
    pub value: ActionValue,
}

impl ActionEvent {
    pub fn pressed(device: DeviceId, action: PlayerAction) -> Self {
        Self {
            device,
            action,
            phase: ActionPhase::Performed,
            value: ActionValue::Button,
        }
    }

    pub fn axis(device: DeviceId, action: PlayerAction, value: f32) -> Self {
        Self {
            value: ActionValue::Axis(value),
            ..Self::pressed(device, action)
        }
    }

    pub fn stick(device: DeviceId, action: PlayerAction, value: Vec2) -> Self {
        Self {
            value: ActionValue::Stick(value),
            ..Self::pressed(device, action)
        }
    }

    pub fn canceled(device: DeviceId, action: PlayerAction) -> Self {
        Self {
            phase: ActionPhase::Canceled,
            ..Self::pressed(device, action)
        }
    }
}
