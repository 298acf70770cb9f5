use bevy_ecs::prelude::Component;

/// Marker for the explorer character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Explorer;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ExplorerTuning {
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Apex height of a jump in world units.
    pub jump_height: f32,
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
}

impl Default for ExplorerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_multiplier: 2.0,
            jump_height: 2.0,
            gravity: -9.81,
        }
    }
}

impl ExplorerTuning {
    pub fn speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        }
    }

    /// Launch speed that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }
}

/// Ground contact as of the last physics step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ExplorerMotion {
    pub grounded: bool,
}
