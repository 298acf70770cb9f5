use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::physics::Aabb;

/// Marker for static level geometry that blocks characters.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Obstacle;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Create a BoxCollider with the given full size.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            half_extents: Vec3::new(width, height, depth).abs() * 0.5,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// World-space box for an entity at `position`.
    pub fn aabb(&self, position: Vec3) -> Aabb {
        let center = position + self.offset;
        Aabb::new(center - self.half_extents, center + self.half_extents)
    }

    pub fn contains_point(&self, position: Vec3, point: Vec3) -> bool {
        let aabb = self.aabb(position);
        point.cmpge(aabb.min).all() && point.cmple(aabb.max).all()
    }
}
