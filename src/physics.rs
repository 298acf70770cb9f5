//! Capsule-versus-box collision queries.
//!
//! The characters are upright capsules and the level is made of axis-aligned
//! boxes, so the queries only need the closest points between a vertical
//! segment and a box. On top of that sit:
//!
//! - [`capsule_cast`]: sweep a capsule along a displacement and report the
//!   first blocking contact, advancing conservatively by the current gap.
//! - [`overlap_capsule`]: every box the capsule currently penetrates, with the
//!   separating normal and depth.
//! - [`push_out`]: one corrective displacement out of a set of overlaps.
//!
//! Boxes already penetrated when a cast starts are ignored by that cast, so a
//! body embedded in geometry can still move out of it.

use bevy_ecs::prelude::Entity;
use glam::Vec3;
use smallvec::SmallVec;

use crate::resources::collisionlayers::{Layer, LayerMask};

/// Gap at which two shapes count as touching.
pub const CONTACT_EPSILON: f32 = 1e-3;
/// Extra distance added to every push-out.
pub const PUSH_OUT_SKIN: f32 = 0.01;
const MAX_CAST_ITERATIONS: usize = 128;
const DEGENERATE: f32 = 1e-6;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

/// Upright capsule in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub center: Vec3,
    pub half_height: f32,
    pub radius: f32,
}

impl Capsule {
    pub fn new(center: Vec3, half_height: f32, radius: f32) -> Self {
        Self {
            center,
            half_height,
            radius,
        }
    }

    /// Upper end of the core segment.
    pub fn top(&self) -> Vec3 {
        self.center + Vec3::Y * self.half_height
    }

    /// Lower end of the core segment.
    pub fn bottom(&self) -> Vec3 {
        self.center - Vec3::Y * self.half_height
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            ..*self
        }
    }

    /// Closest pair of points between the core segment and `aabb`, as
    /// `(on_segment, on_box)`.
    pub fn closest_points(&self, aabb: &Aabb) -> (Vec3, Vec3) {
        let bottom = self.bottom().y;
        let top = self.top().y;
        let y = if top < aabb.min.y {
            (top, aabb.min.y)
        } else if bottom > aabb.max.y {
            (bottom, aabb.max.y)
        } else {
            let shared = bottom.max(aabb.min.y);
            (shared, shared)
        };
        let on_segment = Vec3::new(self.center.x, y.0, self.center.z);
        let on_box = Vec3::new(
            self.center.x.clamp(aabb.min.x, aabb.max.x),
            y.1,
            self.center.z.clamp(aabb.min.z, aabb.max.z),
        );
        (on_segment, on_box)
    }

    /// Signed clearance to `aabb`: negative when the shapes overlap.
    pub fn gap(&self, aabb: &Aabb) -> f32 {
        match self.penetration(aabb) {
            Some((_, depth)) => -depth,
            None => {
                let (s, b) = self.closest_points(aabb);
                s.distance(b) - self.radius
            }
        }
    }

    /// Separating normal (pointing from the box towards the capsule) and
    /// penetration depth, or `None` if the shapes do not overlap.
    pub fn penetration(&self, aabb: &Aabb) -> Option<(Vec3, f32)> {
        let (s, b) = self.closest_points(aabb);
        let delta = s - b;
        let dist = delta.length();
        if dist >= self.radius {
            return None;
        }
        if dist > DEGENERATE {
            return Some((delta / dist, self.radius - dist));
        }
        // Core segment inside the box: leave along the cheapest axis.
        let r = self.radius;
        let c = self.center;
        let candidates = [
            (Vec3::X, aabb.max.x - c.x + r),
            (Vec3::NEG_X, c.x + r - aabb.min.x),
            (Vec3::Y, aabb.max.y - self.bottom().y + r),
            (Vec3::NEG_Y, self.top().y + r - aabb.min.y),
            (Vec3::Z, aabb.max.z - c.z + r),
            (Vec3::NEG_Z, c.z + r - aabb.min.z),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// A static box as seen by the queries.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleShape {
    pub entity: Entity,
    pub aabb: Aabb,
    pub layer: Layer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    pub entity: Entity,
    /// How far the capsule can travel before touching.
    pub distance: f32,
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub entity: Entity,
    pub normal: Vec3,
    pub depth: f32,
}

/// Sweep `capsule` along `motion` and return the nearest blocking contact.
///
/// Only obstacles whose layer is in `mask` are considered. A contact blocks
/// when its normal opposes the motion; grazing or separating contacts do not.
pub fn capsule_cast(
    capsule: &Capsule,
    motion: Vec3,
    obstacles: &[ObstacleShape],
    mask: LayerMask,
) -> Option<CastHit> {
    let max_distance = motion.length();
    if max_distance <= DEGENERATE {
        return None;
    }
    let dir = motion / max_distance;
    obstacles
        .iter()
        .filter(|o| mask.contains(o.layer))
        .filter_map(|o| cast_against(capsule, dir, max_distance, o))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

fn cast_against(
    capsule: &Capsule,
    dir: Vec3,
    max_distance: f32,
    obstacle: &ObstacleShape,
) -> Option<CastHit> {
    if capsule.gap(&obstacle.aabb) < -CONTACT_EPSILON {
        return None;
    }
    let mut travelled = 0.0;
    for _ in 0..MAX_CAST_ITERATIONS {
        let moved = capsule.translated(dir * travelled);
        let (s, b) = moved.closest_points(&obstacle.aabb);
        let delta = s - b;
        let dist = delta.length();
        let gap = dist - capsule.radius;
        if gap <= CONTACT_EPSILON {
            let normal = if dist > DEGENERATE { delta / dist } else { -dir };
            // Distance along a line is convex for two convex shapes, so a
            // non-approaching contact never turns into a hit further on.
            return (normal.dot(dir) < -1e-4).then_some(CastHit {
                entity: obstacle.entity,
                distance: travelled,
                normal,
            });
        }
        travelled += gap;
        if travelled > max_distance {
            return None;
        }
    }
    let moved = capsule.translated(dir * travelled);
    let (s, b) = moved.closest_points(&obstacle.aabb);
    Some(CastHit {
        entity: obstacle.entity,
        distance: travelled,
        normal: (s - b).try_normalize().unwrap_or(-dir),
    })
}

/// Every obstacle in `mask` the capsule currently penetrates.
pub fn overlap_capsule(
    capsule: &Capsule,
    obstacles: &[ObstacleShape],
    mask: LayerMask,
) -> SmallVec<[Overlap; 8]> {
    obstacles
        .iter()
        .filter(|o| mask.contains(o.layer))
        .filter_map(|o| {
            capsule
                .penetration(&o.aabb)
                .map(|(normal, depth)| Overlap {
                    entity: o.entity,
                    normal,
                    depth,
                })
        })
        .collect()
}

/// Single corrective displacement: each overlap pushes along its normal by
/// its depth plus [`PUSH_OUT_SKIN`].
pub fn push_out(overlaps: &[Overlap]) -> Vec3 {
    overlaps
        .iter()
        .fold(Vec3::ZERO, |acc, o| acc + o.normal * (o.depth + PUSH_OUT_SKIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy_ecs::world::World;

    fn layers() -> (Layer, Layer) {
        let mut registry = crate::resources::collisionlayers::CollisionLayers::new();
        let default = registry.ensure_layer("Default").unwrap();
        let wall = registry.ensure_layer("PhaseableWall").unwrap();
        (default, wall)
    }

    fn obstacle(world: &mut World, min: Vec3, max: Vec3, layer: Layer) -> ObstacleShape {
        ObstacleShape {
            entity: world.spawn_empty().id(),
            aabb: Aabb::new(min, max),
            layer,
        }
    }

    fn capsule_at(x: f32, y: f32, z: f32) -> Capsule {
        Capsule::new(Vec3::new(x, y, z), 0.5, 0.5)
    }

    #[test]
    fn closest_points_above_a_floor() {
        let floor = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let (s, b) = capsule_at(1.0, 3.0, 2.0).closest_points(&floor);
        assert_eq!(s, Vec3::new(1.0, 2.5, 2.0));
        assert_eq!(b, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn penetration_beside_a_wall_is_horizontal() {
        let wall = Aabb::new(Vec3::new(1.0, -5.0, -5.0), Vec3::new(2.0, 5.0, 5.0));
        let (normal, depth) = capsule_at(0.75, 0.0, 0.0).penetration(&wall).unwrap();
        assert_abs_diff_eq!(normal.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(depth, 0.25, epsilon = 1e-6);
        assert!(capsule_at(0.4, 0.0, 0.0).penetration(&wall).is_none());
    }

    #[test]
    fn embedded_capsule_leaves_along_the_nearest_face() {
        // Thin wall along Z, capsule centre slightly past the middle.
        let wall = Aabb::new(Vec3::new(-0.5, -5.0, -5.0), Vec3::new(0.5, 5.0, 5.0));
        let (normal, depth) = capsule_at(0.1, 0.0, 0.0).penetration(&wall).unwrap();
        assert_eq!(normal, Vec3::X);
        assert_abs_diff_eq!(depth, 0.9, epsilon = 1e-6);
    }

    #[test]
    fn cast_stops_before_a_wall() {
        let mut world = World::new();
        let (default, _) = layers();
        let wall = obstacle(
            &mut world,
            Vec3::new(2.0, -5.0, -5.0),
            Vec3::new(3.0, 5.0, 5.0),
            default,
        );
        let hit = capsule_cast(
            &capsule_at(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            &[wall],
            LayerMask::ALL,
        )
        .unwrap();
        assert_eq!(hit.entity, wall.entity);
        assert_abs_diff_eq!(hit.distance, 1.5, epsilon = 2.0 * CONTACT_EPSILON);
        assert_abs_diff_eq!(hit.normal.x, -1.0, epsilon = 1e-4);

        let short = capsule_cast(
            &capsule_at(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            &[wall],
            LayerMask::ALL,
        );
        assert!(short.is_none());
    }

    #[test]
    fn cast_ignores_layers_outside_the_mask() {
        let mut world = World::new();
        let (default, wall_layer) = layers();
        let wall = obstacle(
            &mut world,
            Vec3::new(2.0, -5.0, -5.0),
            Vec3::new(3.0, 5.0, 5.0),
            wall_layer,
        );
        let mask = LayerMask::NONE.with(default);
        let hit = capsule_cast(
            &capsule_at(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            &[wall],
            mask,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn cast_ignores_obstacles_it_starts_inside() {
        let mut world = World::new();
        let (default, _) = layers();
        let wall = obstacle(
            &mut world,
            Vec3::new(-1.0, -5.0, -1.0),
            Vec3::new(1.0, 5.0, 1.0),
            default,
        );
        let hit = capsule_cast(
            &capsule_at(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            &[wall],
            LayerMask::ALL,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn resting_on_a_floor_blocks_down_but_not_sideways() {
        let mut world = World::new();
        let (default, _) = layers();
        let floor = obstacle(
            &mut world,
            Vec3::new(-10.0, -1.0, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
            default,
        );
        let resting = capsule_at(0.0, 1.0, 0.0);

        let down = capsule_cast(&resting, Vec3::new(0.0, -0.05, 0.0), &[floor], LayerMask::ALL)
            .unwrap();
        assert_abs_diff_eq!(down.distance, 0.0, epsilon = 1e-6);
        assert_eq!(down.normal, Vec3::Y);

        let slide = capsule_cast(&resting, Vec3::new(1.0, 0.0, 0.5), &[floor], LayerMask::ALL);
        assert!(slide.is_none());
    }

    #[test]
    fn cast_reports_the_nearest_of_several_hits() {
        let mut world = World::new();
        let (default, _) = layers();
        let far = obstacle(
            &mut world,
            Vec3::new(5.0, -5.0, -5.0),
            Vec3::new(6.0, 5.0, 5.0),
            default,
        );
        let near = obstacle(
            &mut world,
            Vec3::new(2.0, -5.0, -5.0),
            Vec3::new(3.0, 5.0, 5.0),
            default,
        );
        let hit = capsule_cast(
            &capsule_at(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            &[far, near],
            LayerMask::ALL,
        )
        .unwrap();
        assert_eq!(hit.entity, near.entity);
    }

    #[test]
    fn push_out_clears_an_embedded_capsule() {
        let mut world = World::new();
        let (default, wall_layer) = layers();
        let wall = obstacle(
            &mut world,
            Vec3::new(-0.5, -5.0, -5.0),
            Vec3::new(0.5, 5.0, 5.0),
            wall_layer,
        );
        let floor = obstacle(
            &mut world,
            Vec3::new(-10.0, -11.0, -10.0),
            Vec3::new(10.0, -10.0, 10.0),
            default,
        );
        let obstacles = [wall, floor];
        let capsule = capsule_at(0.2, 0.0, 0.0);

        let overlaps = overlap_capsule(&capsule, &obstacles, LayerMask::ALL);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].entity, wall.entity);

        let resolved = capsule.translated(push_out(&overlaps));
        assert!(overlap_capsule(&resolved, &obstacles, LayerMask::ALL).is_empty());
        assert!(resolved.center.x > 1.0);
    }

    #[test]
    fn push_out_of_nothing_is_zero() {
        assert_eq!(push_out(&[]), Vec3::ZERO);
    }
}
