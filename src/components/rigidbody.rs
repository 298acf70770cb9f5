//! Kinematic body with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and any number of named
//! acceleration forces. The explorer carries a `"gravity"` force; the ghost
//! floats and carries none.
//!
//! The `frozen` flag suspends the body entirely: movement systems skip it, so
//! it neither moves nor resolves collisions. Possession freezes the ghost for
//! as long as it pilots the explorer.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Name of the force the explorer falls with.
pub const GRAVITY_FORCE: &str = "gravity";

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationForce {
    /// World units per second squared.
    pub value: Vec3,
    pub enabled: bool,
}

impl AccelerationForce {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and named acceleration forces.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.add_force(GRAVITY_FORCE, Vec3::new(0.0, -9.81, 0.0));
/// rb.freeze(); // possessed ghost: no movement, no collision response
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// World units per second.
    pub velocity: Vec3,
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, movement systems skip this body.
    pub frozen: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body with an enabled gravity force pulling along -Y by `gravity` (a negative number).
    pub fn with_gravity(gravity: f32) -> Self {
        let mut rb = Self::new();
        rb.add_force(GRAVITY_FORCE, Vec3::new(0.0, gravity, 0.0));
        rb
    }

    /// Add or update a named acceleration force (enabled).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    pub fn remove_force(&mut self, name: &str) {
        self.forces.remove(name);
    }

    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Sum of all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec3::ZERO, |acc, f| acc + f.value)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
        self.velocity = Vec3::ZERO;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
