//! Axis-aligned collision geometry
//!
//! Every entity collides as a box. Overlap is strict: boxes that only share an
//! edge do not touch, so an entity resting against a wall never "hits" it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (y grows downward, like the screen)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    /// Box centered on a point
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The rectangular play area, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Clamp a box's top-left corner so the whole box stays inside the playfield
    pub fn clamp_box(&self, top_left: Vec2, size: Vec2) -> Vec2 {
        let max = Vec2::new(self.width - size.x, self.height - size.y).max(Vec2::ZERO);
        top_left.clamp(Vec2::ZERO, max)
    }

    /// True once a box has left the playfield entirely by more than `margin`
    pub fn box_beyond(&self, aabb: &Aabb, margin: f32) -> bool {
        aabb.max.x < -margin
            || aabb.min.x > self.width + margin
            || aabb.min.y > self.height + margin
            || aabb.max.y < -margin
    }

    /// True once a point lies more than `margin` outside the playfield
    pub fn point_beyond(&self, point: Vec2, margin: f32) -> bool {
        point.x < -margin
            || point.x > self.width + margin
            || point.y < -margin
            || point.y > self.height + margin
    }
}

/// Unit direction from `from` toward `to`.
///
/// A zero-length delta is divided by 1 instead of 0, so coincident points yield
/// a zero vector rather than NaN.
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 { delta / dist } else { delta }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let overlapping = Aabb::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_from_center_round_trips() {
        let b = Aabb::from_center(Vec2::new(100.0, 50.0), Vec2::splat(6.0));
        assert_eq!(b.center(), Vec2::new(100.0, 50.0));
        assert_eq!(b.size(), Vec2::splat(12.0));
    }

    #[test]
    fn test_clamp_box_keeps_box_inside() {
        let field = Playfield::new(800.0, 600.0);
        let size = Vec2::splat(50.0);

        assert_eq!(field.clamp_box(Vec2::new(-5.0, -5.0), size), Vec2::ZERO);
        assert_eq!(
            field.clamp_box(Vec2::new(900.0, 700.0), size),
            Vec2::new(750.0, 550.0)
        );
        assert_eq!(
            field.clamp_box(Vec2::new(10.0, 20.0), size),
            Vec2::new(10.0, 20.0)
        );
    }

    #[test]
    fn test_box_beyond_margin() {
        let field = Playfield::new(800.0, 600.0);
        let size = Vec2::splat(20.0);

        // Just spawned at the right edge: still in range
        assert!(!field.box_beyond(&Aabb::new(Vec2::new(800.0, 100.0), size), 100.0));
        // Right edge 101 units left of the playfield
        assert!(field.box_beyond(&Aabb::new(Vec2::new(-121.0, 100.0), size), 100.0));
        // Exactly at the margin is not beyond
        assert!(!field.box_beyond(&Aabb::new(Vec2::new(-120.0, 100.0), size), 100.0));
        assert!(field.box_beyond(&Aabb::new(Vec2::new(100.0, 701.0), size), 100.0));
    }

    #[test]
    fn test_point_beyond_margin() {
        let field = Playfield::new(800.0, 600.0);
        assert!(!field.point_beyond(Vec2::new(-50.0, 0.0), 50.0));
        assert!(field.point_beyond(Vec2::new(-50.5, 0.0), 50.0));
        assert!(field.point_beyond(Vec2::new(400.0, 651.0), 50.0));
    }

    #[test]
    fn test_direction_toward() {
        let dir = direction_toward(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);

        // Coincident points: no NaN
        let dir = direction_toward(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_eq!(dir, Vec2::ZERO);
    }
}
