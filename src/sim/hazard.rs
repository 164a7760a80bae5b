//! Hazard spawning and movement

use glam::Vec2;
use rand::Rng;

use super::collision::{Playfield, direction_toward};
use super::state::{EntityId, Hazard, HazardKind};
use crate::consts::*;

/// Playfield edge a hazard enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit axis pointing into the playfield from this edge
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => -Vec2::X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => -Vec2::Y,
        }
    }

    /// Top-left corner just off this edge for a box of `size`, at a random
    /// offset along the edge
    pub fn spawn_position(self, rng: &mut impl Rng, playfield: &Playfield, size: Vec2) -> Vec2 {
        let along_x = || (playfield.width - size.x).max(0.0);
        let along_y = || (playfield.height - size.y).max(0.0);
        match self {
            Edge::Left => Vec2::new(-size.x, rng.random_range(0.0..=along_y())),
            Edge::Right => Vec2::new(playfield.width, rng.random_range(0.0..=along_y())),
            Edge::Top => Vec2::new(rng.random_range(0.0..=along_x()), -size.y),
            Edge::Bottom => Vec2::new(rng.random_range(0.0..=along_x()), playfield.height),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A Drifter entering from a random edge, moving straight across
pub fn spawn_drifter(
    rng: &mut impl Rng,
    id: EntityId,
    playfield: &Playfield,
    speed: f32,
) -> Hazard {
    let size = Vec2::new(
        rng.random_range(DRIFTER_MIN_EXTENT..=DRIFTER_MAX_EXTENT) as f32,
        rng.random_range(DRIFTER_MIN_EXTENT..=DRIFTER_MAX_EXTENT) as f32,
    );
    let edge = Edge::random(rng);
    Hazard {
        id,
        pos: edge.spawn_position(rng, playfield, size),
        size,
        hp: DRIFTER_HP,
        max_hp: DRIFTER_HP,
        speed,
        kind: HazardKind::Drifter {
            heading: edge.inward(),
        },
    }
}

/// A square Seeker entering from a random edge, homing on `target`
pub fn spawn_seeker(
    rng: &mut impl Rng,
    id: EntityId,
    playfield: &Playfield,
    speed: f32,
    target: EntityId,
) -> Hazard {
    let extent = rng.random_range(SEEKER_MIN_EXTENT..=SEEKER_MAX_EXTENT) as f32;
    let size = Vec2::splat(extent);
    let edge = Edge::random(rng);
    Hazard {
        id,
        pos: edge.spawn_position(rng, playfield, size),
        size,
        hp: SEEKER_HP,
        max_hp: SEEKER_HP,
        speed,
        kind: HazardKind::Seeker { target },
    }
}

/// Next top-left position for a hazard.
///
/// `target` is the resolved center of a Seeker's target. An unresolved target
/// makes the Seeker drift left like an old-style obstacle.
pub fn advance(hazard: &Hazard, target: Option<Vec2>) -> Vec2 {
    match hazard.kind {
        HazardKind::Drifter { heading } => hazard.pos + heading * hazard.speed,
        HazardKind::Seeker { .. } => match target {
            Some(target) => hazard.pos + direction_toward(hazard.center(), target) * hazard.speed,
            None => hazard.pos - Vec2::X * hazard.speed,
        },
    }
}
