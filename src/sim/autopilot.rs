//! Idle/demo mode - a simple AI that plays the game
//!
//! Reads the state and produces the input a reasonable player would send:
//! chase the orb (or a pickup when healthy), sidestep close hazards, and shoot
//! at whatever hazard is nearest.

use glam::Vec2;

use super::state::{GameState, Hazard};
use super::tick::TickInput;

/// Hazards closer than this (center to center) trigger a sidestep
const DODGE_RADIUS: f32 = 110.0;
/// Detour for pickups only above this energy
const PICKUP_ENERGY_THRESHOLD: f32 = 50.0;
/// Per-axis distance ignored to avoid jitter around the destination
const DEADZONE: f32 = 3.0;

/// Compute this tick's input from the current state
pub fn plan(state: &GameState) -> TickInput {
    let center = state.player.center();
    let threat = nearest_hazard(state, center);

    let destination = if state.player.energy > PICKUP_ENERGY_THRESHOLD {
        state
            .pickups
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(center)
                    .partial_cmp(&b.pos.distance_squared(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.pos)
            .unwrap_or(state.orb.pos)
    } else {
        state.orb.pos
    };

    let mut heading = destination - center;
    if let Some(hazard) = threat {
        let away = center - hazard.center();
        if away.length() < DODGE_RADIUS && !state.player.invulnerable {
            heading = away;
        }
    }

    TickInput {
        move_x: axis(heading.x),
        move_y: axis(heading.y),
        fire: threat.is_some(),
        aim: threat.map(Hazard::center).unwrap_or(center + Vec2::X),
    }
}

fn nearest_hazard(state: &GameState, from: Vec2) -> Option<&Hazard> {
    state.hazards.iter().min_by(|a, b| {
        a.center()
            .distance_squared(from)
            .partial_cmp(&b.center().distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn axis(delta: f32) -> i8 {
    if delta > DEADZONE {
        1
    } else if delta < -DEADZONE {
        -1
    } else {
        0
    }
}
