//! Upright capsule shape used by both characters.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::physics::Capsule;

/// Vertical capsule: a segment from `center - half_height` to
/// `center + half_height` swept by `radius`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CapsuleCollider {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for CapsuleCollider {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl CapsuleCollider {
    pub fn new(half_height: f32, radius: f32) -> Self {
        Self {
            half_height,
            radius,
        }
    }

    pub fn at(&self, position: Vec3) -> Capsule {
        Capsule::new(position, self.half_height, self.radius)
    }

    /// Distance from the center to the lowest point of the shape.
    pub fn foot_offset(&self) -> f32 {
        self.half_height + self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foot_offset_reaches_the_bottom_of_the_shape() {
        let collider = CapsuleCollider::new(0.75, 0.25);
        let capsule = collider.at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(collider.foot_offset(), 1.0);
        assert_eq!(capsule.bottom().y - capsule.radius, 1.0);
    }
}
