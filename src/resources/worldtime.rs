//! Simulation clock.
//!
//! [`WorldTime`] carries the scaled frame delta consumed by per-frame systems
//! (look, fear drain) and the fixed timestep consumed by the physics-step
//! systems (movement). The host loop owns the fixed-step accumulator; see
//! [`Simulation`](crate::game::Simulation).

use bevy_ecs::prelude::Resource;

/// Default physics step in seconds (50 Hz).
pub const DEFAULT_FIXED_DELTA: f32 = 0.02;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds elapsed since the simulation started, scaled.
    pub elapsed: f32,
    /// Scaled duration of the current frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
    /// Duration of one physics step.
    pub fixed_delta: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            fixed_delta: DEFAULT_FIXED_DELTA,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }
}
