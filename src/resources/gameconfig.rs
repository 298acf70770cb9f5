//! Gameplay tunables.
//!
//! Speeds, fear rates, thresholds and layer names loaded from an INI file.
//! Defaults are safe for startup; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [ghost]
//! move_speed = 5
//! fly_speed = 3
//! look_sensitivity = 2
//! fear = 100
//! max_fear = 100
//! fear_drain_rate = 20
//! fear_regen_rate = 0
//! phase_cost = 0
//!
//! [possession]
//! required_fear = 50
//! drain_rate = 10
//! ; radius = 4        (absent: no proximity check)
//!
//! [explorer]
//! move_speed = 5
//! sprint_multiplier = 2
//! jump_height = 2
//! gravity = -9.81
//! look_sensitivity = 2
//!
//! [layers]
//! default = Default
//! ghost = Ghost
//! phaseable_wall = PhaseableWall
//!
//! [simulation]
//! fixed_timestep = 0.02
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::explorer::ExplorerTuning;
use crate::components::ghost::GhostTuning;
use crate::components::possession::PossessionTuning;

const DEFAULT_GHOST_MOVE_SPEED: f32 = 5.0;
const DEFAULT_GHOST_FLY_SPEED: f32 = 3.0;
const DEFAULT_LOOK_SENSITIVITY: f32 = 2.0;
const DEFAULT_FEAR: f32 = 100.0;
const DEFAULT_FEAR_DRAIN_RATE: f32 = 20.0;
const DEFAULT_REQUIRED_FEAR: f32 = 50.0;
const DEFAULT_POSSESSION_DRAIN_RATE: f32 = 10.0;
const DEFAULT_EXPLORER_MOVE_SPEED: f32 = 5.0;
const DEFAULT_SPRINT_MULTIPLIER: f32 = 2.0;
const DEFAULT_JUMP_HEIGHT: f32 = 2.0;
const DEFAULT_GRAVITY: f32 = -9.81;
const DEFAULT_FIXED_TIMESTEP: f32 = 0.02;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Gameplay configuration resource.
///
/// Inserted once at startup; the
/// [`apply_gameconfig_changes`](crate::systems::gameconfig::apply_gameconfig_changes)
/// system pushes the values into live components whenever it changes.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub ghost_move_speed: f32,
    pub ghost_fly_speed: f32,
    pub ghost_look_sensitivity: f32,
    /// Fear the ghost starts with.
    pub ghost_fear: f32,
    pub ghost_max_fear: f32,
    /// Fear per second while phasing.
    pub fear_drain_rate: f32,
    /// Fear per second while solid and not possessing.
    pub fear_regen_rate: f32,
    /// Flat fear cost to start phasing.
    pub phase_cost: f32,
    pub required_fear: f32,
    /// Fear per second while possessing.
    pub possession_drain_rate: f32,
    /// Maximum ghost-explorer distance to start possessing; `None` disables the check.
    pub possession_radius: Option<f32>,
    pub explorer_move_speed: f32,
    pub sprint_multiplier: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub explorer_look_sensitivity: f32,
    pub default_layer_name: String,
    pub ghost_layer_name: String,
    pub phaseable_wall_layer_name: String,
    /// Physics step in seconds.
    pub fixed_timestep: f32,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            ghost_move_speed: DEFAULT_GHOST_MOVE_SPEED,
            ghost_fly_speed: DEFAULT_GHOST_FLY_SPEED,
            ghost_look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            ghost_fear: DEFAULT_FEAR,
            ghost_max_fear: DEFAULT_FEAR,
            fear_drain_rate: DEFAULT_FEAR_DRAIN_RATE,
            fear_regen_rate: 0.0,
            phase_cost: 0.0,
            required_fear: DEFAULT_REQUIRED_FEAR,
            possession_drain_rate: DEFAULT_POSSESSION_DRAIN_RATE,
            possession_radius: None,
            explorer_move_speed: DEFAULT_EXPLORER_MOVE_SPEED,
            sprint_multiplier: DEFAULT_SPRINT_MULTIPLIER,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            explorer_look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            default_layer_name: "Default".to_string(),
            ghost_layer_name: "Ghost".to_string(),
            phaseable_wall_layer_name: "PhaseableWall".to_string(),
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [ghost]
        if let Some(v) = float("ghost", "move_speed") {
            self.ghost_move_speed = v;
        }
        if let Some(v) = float("ghost", "fly_speed") {
            self.ghost_fly_speed = v;
        }
        if let Some(v) = float("ghost", "look_sensitivity") {
            self.ghost_look_sensitivity = v;
        }
        if let Some(v) = float("ghost", "fear") {
            self.ghost_fear = v;
        }
        if let Some(v) = float("ghost", "max_fear") {
            self.ghost_max_fear = v;
        }
        if let Some(v) = float("ghost", "fear_drain_rate") {
            self.fear_drain_rate = v;
        }
        if let Some(v) = float("ghost", "fear_regen_rate") {
            self.fear_regen_rate = v;
        }
        if let Some(v) = float("ghost", "phase_cost") {
            self.phase_cost = v;
        }

        // [possession]
        if let Some(v) = float("possession", "required_fear") {
            self.required_fear = v;
        }
        if let Some(v) = float("possession", "drain_rate") {
            self.possession_drain_rate = v;
        }
        if let Some(v) = float("possession", "radius") {
            self.possession_radius = Some(v);
        }

        // [explorer]
        if let Some(v) = float("explorer", "move_speed") {
            self.explorer_move_speed = v;
        }
        if let Some(v) = float("explorer", "sprint_multiplier") {
            self.sprint_multiplier = v;
        }
        if let Some(v) = float("explorer", "jump_height") {
            self.jump_height = v;
        }
        if let Some(v) = float("explorer", "gravity") {
            self.gravity = v;
        }
        if let Some(v) = float("explorer", "look_sensitivity") {
            self.explorer_look_sensitivity = v;
        }

        // [layers]
        if let Some(name) = config.get("layers", "default") {
            self.default_layer_name = name;
        }
        if let Some(name) = config.get("layers", "ghost") {
            self.ghost_layer_name = name;
        }
        if let Some(name) = config.get("layers", "phaseable_wall") {
            self.phaseable_wall_layer_name = name;
        }

        // [simulation]
        if let Some(v) = float("simulation", "fixed_timestep") {
            if v > 0.0 {
                self.fixed_timestep = v;
            }
        }

        info!(
            "Loaded config: fear={}/{}, phase_cost={}, possess>={} drain={}/s radius={:?}, fixed_dt={}",
            self.ghost_fear,
            self.ghost_max_fear,
            self.phase_cost,
            self.required_fear,
            self.possession_drain_rate,
            self.possession_radius,
            self.fixed_timestep
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("ghost", "move_speed", self.ghost_move_speed.to_string());
        set("ghost", "fly_speed", self.ghost_fly_speed.to_string());
        set("ghost", "look_sensitivity", self.ghost_look_sensitivity.to_string());
        set("ghost", "fear", self.ghost_fear.to_string());
        set("ghost", "max_fear", self.ghost_max_fear.to_string());
        set("ghost", "fear_drain_rate", self.fear_drain_rate.to_string());
        set("ghost", "fear_regen_rate", self.fear_regen_rate.to_string());
        set("ghost", "phase_cost", self.phase_cost.to_string());

        set("possession", "required_fear", self.required_fear.to_string());
        set("possession", "drain_rate", self.possession_drain_rate.to_string());
        if let Some(radius) = self.possession_radius {
            set("possession", "radius", radius.to_string());
        }

        set("explorer", "move_speed", self.explorer_move_speed.to_string());
        set("explorer", "sprint_multiplier", self.sprint_multiplier.to_string());
        set("explorer", "jump_height", self.jump_height.to_string());
        set("explorer", "gravity", self.gravity.to_string());
        set(
            "explorer",
            "look_sensitivity",
            self.explorer_look_sensitivity.to_string(),
        );

        set("layers", "default", self.default_layer_name.clone());
        set("layers", "ghost", self.ghost_layer_name.clone());
        set("layers", "phaseable_wall", self.phaseable_wall_layer_name.clone());

        set("simulation", "fixed_timestep", self.fixed_timestep.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn ghost_tuning(&self) -> GhostTuning {
        GhostTuning {
            move_speed: self.ghost_move_speed,
            fly_speed: self.ghost_fly_speed,
            fear_drain_rate: self.fear_drain_rate,
            fear_regen_rate: self.fear_regen_rate,
            phase_cost: self.phase_cost,
        }
    }

    pub fn possession_tuning(&self) -> PossessionTuning {
        PossessionTuning {
            required_fear: self.required_fear,
            drain_rate: self.possession_drain_rate,
            radius: self.possession_radius,
        }
    }

    pub fn explorer_tuning(&self) -> ExplorerTuning {
        ExplorerTuning {
            move_speed: self.explorer_move_speed,
            sprint_multiplier: self.sprint_multiplier,
            jump_height: self.jump_height,
            gravity: self.gravity,
        }
    }
}
