//! Scripted input for headless runs.
//!
//! An input script is a JSON file listing device actions by frame number:
//!
//! ```json
//! {
//!   "actions": [
//!     { "frame": 0,  "device": 1, "action": "possess" },
//!     { "frame": 5,  "device": 1, "action": "movement", "value": [0.0, 1.0] },
//!     { "frame": 60, "device": 1, "action": "movement", "phase": "canceled" },
//!     { "frame": 90, "device": 1, "action": "fly_up", "value": 1.0 }
//!   ]
//! }
//! ```
//!
//! `phase` defaults to `performed`; a missing `value` is a button press.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::events::input::{ActionEvent, ActionPhase, ActionValue, PlayerAction};
use crate::resources::routing::DeviceId;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum ScriptValue {
    Axis(f32),
    Stick([f32; 2]),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScriptedAction {
    pub frame: u64,
    pub device: u32,
    pub action: PlayerAction,
    #[serde(default)]
    pub phase: ActionPhase,
    #[serde(default)]
    pub value: Option<ScriptValue>,
}

impl ScriptedAction {
    pub fn to_event(&self) -> ActionEvent {
        let value = match self.value {
            None => ActionValue::Button,
            Some(ScriptValue::Axis(x)) => ActionValue::Axis(x),
            Some(ScriptValue::Stick([x, y])) => ActionValue::Stick(glam::Vec2::new(x, y)),
        };
        ActionEvent {
            device: DeviceId(self.device),
            action: self.action,
            phase: self.phase,
            value,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    pub actions: Vec<ScriptedAction>,
}

impl InputScript {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid input script: {}", e))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read input script {:?}: {}", path, e))?;
        Self::from_json(&json)
    }

    /// Events scheduled for `frame`, in file order.
    pub fn events_for_frame(&self, frame: u64) -> impl Iterator<Item = ActionEvent> + '_ {
        self.actions
            .iter()
            .filter(move |a| a.frame == frame)
            .map(ScriptedAction::to_event)
    }

    /// Last frame with a scripted action.
    pub fn last_frame(&self) -> Option<u64> {
        self.actions.iter().map(|a| a.frame).max()
    }
}
