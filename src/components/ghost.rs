use bevy_ecs::prelude::Component;

/// Marker for the ghost character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ghost;

/// Ghost movement and fear tunables.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GhostTuning {
    pub move_speed: f32,
    pub fly_speed: f32,
    /// Fear per second while phasing.
    pub fear_drain_rate: f32,
    /// Fear per second while solid and idle.
    pub fear_regen_rate: f32,
    /// Flat fear cost to start phasing.
    pub phase_cost: f32,
}

impl Default for GhostTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            fly_speed: 3.0,
            fear_drain_rate: 20.0,
            fear_regen_rate: 0.0,
            phase_cost: 0.0,
        }
    }
}
