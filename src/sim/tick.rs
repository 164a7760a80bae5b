//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. Steps run in a
//! fixed order; collision outcomes depend on it.

use glam::Vec2;
use rand::Rng;

use super::hazard;
use super::state::{
    EntityId, GameEvent, GamePhase, GameState, HazardKind, Pickup, PickupKind, Projectile,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal intent: -1, 0 or 1
    pub move_x: i8,
    /// Vertical intent: -1, 0 or 1 (positive is down)
    pub move_y: i8,
    /// Fire toward `aim`
    pub fire: bool,
    /// Aim point in playfield coordinates
    pub aim: Vec2,
}

impl TickInput {
    /// Movement intent with each axis clamped to {-1, 0, 1}
    pub fn intent(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.move_x.signum()),
            f32::from(self.move_y.signum()),
        )
    }
}

/// Advance the session by one tick. Returns true once the session is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    state.events.clear();
    if state.phase == GamePhase::GameOver {
        // Gameplay is frozen; only presentation keeps winding down
        state.decay_presentation();
        let playfield = state.playfield;
        state.particles.update(&playfield);
        return true;
    }

    state.time_ticks += 1;

    state.weapon.decay_cooldown();
    state.decay_presentation();

    fire(state, input);
    move_player(state, input);
    let mut depleted = drain_energy(state);
    spawn_hazards(state);
    update_hazards(state);
    update_projectiles(state);
    collect_orb(state);
    depleted |= collide_player_with_hazards(state);
    state.recompute_score();
    // The session ends with the score of the tick that depleted it
    if depleted {
        state.enter_game_over();
    }
    update_pickups(state);
    tick_buffs(state);

    let playfield = state.playfield;
    state.particles.update(&playfield);

    state.is_terminal()
}

fn fire(state: &mut GameState, input: &TickInput) {
    if !input.fire || !state.weapon.ready() {
        return;
    }
    let id = state.next_entity_id();
    let projectile = Projectile::aimed(id, state.player.center(), input.aim, state.weapon.damage);
    state.projectiles.push(projectile);
    state.weapon.cooldown = state.weapon.current_cooldown(&state.buffs);
    state.events.push(GameEvent::ProjectileFired { id });
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let intent = input.intent();
    let playfield = state.playfield;
    state.player.step(intent, &playfield);

    if intent != Vec2::ZERO {
        let center = state.player.center();
        let ratio = state.player.energy_ratio();
        state.particles.emit_trail(center, intent, ratio);
    }
}

fn drain_energy(state: &mut GameState) -> bool {
    state.player.drain(ENERGY_DRAIN_PER_TICK);
    state.player.is_depleted()
}

fn spawn_hazards(state: &mut GameState) {
    state.spawn_timer += 1;
    if state.spawn_timer < state.difficulty.spawn_interval() {
        return;
    }
    state.spawn_timer = 0;

    let playfield = state.playfield;
    let id = state.next_entity_id();
    let drifter = hazard::spawn_drifter(
        &mut state.rng,
        id,
        &playfield,
        state.difficulty.hazard_speed(),
    );
    log::debug!("Spawned drifter {} at {:?}", drifter.id, drifter.pos);
    state.hazards.push(drifter);

    if state.difficulty.seekers_enabled() && state.rng.random_bool(SEEKER_SPAWN_CHANCE) {
        let id = state.next_entity_id();
        let target = state.player.id;
        let seeker = hazard::spawn_seeker(
            &mut state.rng,
            id,
            &playfield,
            state.difficulty.seeker_speed(),
            target,
        );
        log::debug!("Spawned seeker {} at {:?}", seeker.id, seeker.pos);
        state.hazards.push(seeker);
    }
}

fn update_hazards(state: &mut GameState) {
    // Targets are resolved before any hazard moves, so every seeker in a tick
    // chases the same player position.
    let targets: Vec<Option<Vec2>> = state
        .hazards
        .iter()
        .map(|h| match h.kind {
            HazardKind::Seeker { target } => state.resolve_target(target),
            HazardKind::Drifter { .. } => None,
        })
        .collect();

    for (h, target) in state.hazards.iter_mut().zip(targets) {
        h.pos = hazard::advance(h, target);
    }

    let playfield = state.playfield;
    state
        .hazards
        .retain(|h| !playfield.box_beyond(&h.aabb(), HAZARD_MARGIN));
}

fn update_projectiles(state: &mut GameState) {
    let playfield = state.playfield;
    for projectile in state.projectiles.iter_mut() {
        projectile.advance();
    }
    state
        .projectiles
        .retain(|p| p.life > 0 && !playfield.point_beyond(p.pos, PROJECTILE_MARGIN));

    // Each projectile hits at most one hazard: the first overlap in spawn order
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());
    for projectile in projectiles {
        let bounds = projectile.aabb();
        let Some(index) = state
            .hazards
            .iter()
            .position(|h| h.aabb().intersects(&bounds))
        else {
            survivors.push(projectile);
            continue;
        };

        if state.hazards[index].take_damage(projectile.damage) {
            let dead = state.hazards.remove(index);
            on_hazard_killed(state, dead.id, dead.center(), dead.is_seeker());
        }
    }
    state.projectiles = survivors;
}

fn on_hazard_killed(state: &mut GameState, id: EntityId, at: Vec2, seeker: bool) {
    state.kill_bonus += KILL_BONUS;
    state.hazards_destroyed += 1;
    state.particles.burst_confetti(at, KILL_BURST);
    state.events.push(GameEvent::HazardKilled { id, at, seeker });
    log::debug!("Hazard {} destroyed", id);

    if state.rng.random_bool(PICKUP_DROP_CHANCE) {
        let kind = PickupKind::random(&mut state.rng);
        let pickup_id = state.next_entity_id();
        state.pickups.push(Pickup::new(pickup_id, kind, at));
        state.events.push(GameEvent::PickupSpawned {
            id: pickup_id,
            kind,
        });
    }
}

fn collect_orb(state: &mut GameState) {
    if !state.player.aabb().intersects(&state.orb.aabb()) {
        return;
    }
    let at = state.orb.pos;
    let playfield = state.playfield;
    state.orb.respawn(&mut state.rng, &playfield);
    state.player.heal(ORB_HEAL);
    state.orbs_collected += 1;
    state.events.push(GameEvent::OrbCollected { at });
}

/// Returns true if a hit left the player without energy
fn collide_player_with_hazards(state: &mut GameState) -> bool {
    let player_box = state.player.aabb();
    let before = state.hazards.len();
    state.hazards.retain(|h| !h.aabb().intersects(&player_box));
    let hits = before - state.hazards.len();

    let mut depleted = false;
    for _ in 0..hits {
        let shielded = state.player.invulnerable;
        if !shielded {
            state.player.drain(HAZARD_CONTACT_DAMAGE);
        }
        state.shake.trigger(SHAKE_TICKS, SHAKE_MAGNITUDE);
        state.events.push(GameEvent::PlayerDamaged {
            shielded,
            shake_ticks: SHAKE_TICKS,
            shake_magnitude: SHAKE_MAGNITUDE,
        });
        depleted |= state.player.is_depleted();
    }
    depleted
}

fn update_pickups(state: &mut GameState) {
    for pickup in state.pickups.iter_mut() {
        pickup.ground_life = pickup.ground_life.saturating_sub(1);
    }
    state.pickups.retain(|p| p.ground_life > 0);

    let player_box = state.player.aabb();
    let mut collected = Vec::new();
    state.pickups.retain(|p| {
        if p.aabb().intersects(&player_box) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state
            .buffs
            .apply_pickup(kind, &mut state.player, &mut state.weapon);
        let center = state.player.center();
        state.particles.burst_confetti(center, PICKUP_BURST);
        state.events.push(GameEvent::PickupCollected { kind });
        log::debug!("Collected {:?}", kind);
    }
}

fn tick_buffs(state: &mut GameState) {
    let expired = state.buffs.tick(&mut state.player, &mut state.weapon);
    for kind in expired {
        state.events.push(GameEvent::BuffExpired { kind });
    }
}
