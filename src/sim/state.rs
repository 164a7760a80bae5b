//! Game state and core simulation types
//!
//! Everything session-scoped lives in [`GameState`]; replacing it is a reset.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::buffs::{BuffKind, BuffRegistry};
use super::collision::{Aabb, Playfield};
use super::particles::ParticleEmitter;
use crate::consts::*;
use crate::settings::{Difficulty, Settings};

/// Stable identifier handed out in spawn order
pub type EntityId = u32;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Energy ran out; ticks are no-ops until reset
    GameOver,
}

/// Player tint (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerColor {
    #[default]
    Yellow,
    Cyan,
    Coral,
    Violet,
}

impl PlayerColor {
    /// RGB hex for the presentation layer
    pub fn rgb(self) -> u32 {
        match self {
            PlayerColor::Yellow => 0xFFFF00,
            PlayerColor::Cyan => 0x00FFFF,
            PlayerColor::Coral => 0xFF6464,
            PlayerColor::Violet => 0xB478FF,
        }
    }
}

/// The player-controlled square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub energy: f32,
    /// Speed without buffs; Speed buff expiry restores exactly this
    pub base_speed: f32,
    pub speed: f32,
    pub invulnerable: bool,
    pub color: PlayerColor,
    /// Recent centers, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Player {
    pub fn new(id: EntityId, center: Vec2, color: PlayerColor) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            id,
            pos: center - size * 0.5,
            size,
            energy: MAX_ENERGY,
            base_speed: PLAYER_BASE_SPEED,
            speed: PLAYER_BASE_SPEED,
            invulnerable: false,
            color,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move by `intent * speed`, clamped to the playfield, and record the trail
    pub fn step(&mut self, intent: Vec2, playfield: &Playfield) {
        self.pos = playfield.clamp_box(self.pos + intent * self.speed, self.size);
        self.record_trail();
    }

    /// Append the current center, evicting the oldest point past capacity
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.center());
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, MAX_ENERGY);
    }

    pub fn drain(&mut self, amount: f32) {
        self.energy = (self.energy - amount).clamp(0.0, MAX_ENERGY);
    }

    pub fn is_depleted(&self) -> bool {
        self.energy <= 0.0
    }

    /// Energy as a 0-1 ratio
    pub fn energy_ratio(&self) -> f32 {
        self.energy / MAX_ENERGY
    }
}

/// Shooting stats; damage and cooldown are modified by buffs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    pub base_cooldown: u32,
    pub base_damage: u32,
    pub damage: u32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            cooldown: 0,
            base_cooldown: BASE_SHOOT_COOLDOWN,
            base_damage: BASE_PROJECTILE_DAMAGE,
            damage: BASE_PROJECTILE_DAMAGE,
        }
    }
}

impl Weapon {
    pub fn ready(&self) -> bool {
        self.cooldown == 0
    }

    pub fn decay_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Cooldown to apply after firing. Rapid fire halves it, never below 2 ticks.
    pub fn current_cooldown(&self, buffs: &BuffRegistry) -> u32 {
        if buffs.is_active(BuffKind::RapidFire) {
            (self.base_cooldown / 2).max(MIN_SHOOT_COOLDOWN)
        } else {
            self.base_cooldown
        }
    }
}

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Straight line along one axis; `heading` is a unit axis vector
    Drifter { heading: Vec2 },
    /// Homes toward an entity, resolved by id every tick
    Seeker { target: EntityId },
}

/// A hostile box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub kind: HazardKind,
}

impl Hazard {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Apply damage; returns true if the hazard is now dead
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        self.hp = self.hp.saturating_sub(damage);
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_seeker(&self) -> bool {
        matches!(self.kind, HazardKind::Seeker { .. })
    }
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub damage: u32,
    pub radius: f32,
}

impl Projectile {
    /// Spawn at `origin` heading toward `target` at projectile speed
    pub fn aimed(id: EntityId, origin: Vec2, target: Vec2, damage: u32) -> Self {
        Self {
            id,
            pos: origin,
            vel: super::collision::direction_toward(origin, target) * PROJECTILE_SPEED,
            life: PROJECTILE_LIFE,
            damage: damage.max(1),
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    RapidFire,
    Shield,
    Speed,
    Damage,
}

impl PickupKind {
    pub const ALL: [PickupKind; 5] = [
        PickupKind::Health,
        PickupKind::RapidFire,
        PickupKind::Shield,
        PickupKind::Speed,
        PickupKind::Damage,
    ];

    /// The timed buff this pickup grants (Health is instant)
    pub fn buff(self) -> Option<BuffKind> {
        match self {
            PickupKind::Health => None,
            PickupKind::RapidFire => Some(BuffKind::RapidFire),
            PickupKind::Shield => Some(BuffKind::Shield),
            PickupKind::Speed => Some(BuffKind::Speed),
            PickupKind::Damage => Some(BuffKind::Damage),
        }
    }

    /// Effect duration in seconds (0 for instant)
    pub fn duration_secs(self) -> u32 {
        self.buff().map(BuffKind::duration_secs).unwrap_or(0)
    }

    /// Notification text for the presentation layer
    pub fn label(self) -> &'static str {
        match self {
            PickupKind::Health => "Health Restored",
            PickupKind::RapidFire => "Rapid Fire",
            PickupKind::Shield => "Shield",
            PickupKind::Speed => "Speed",
            PickupKind::Damage => "Damage",
        }
    }

    pub fn icon(self) -> char {
        match self {
            PickupKind::Health => '+',
            PickupKind::RapidFire => 'R',
            PickupKind::Shield => 'S',
            PickupKind::Speed => 'V',
            PickupKind::Damage => 'D',
        }
    }

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A pickup lying on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    /// Center
    pub pos: Vec2,
    /// Ticks before it vanishes unclaimed
    pub ground_life: u32,
}

impl Pickup {
    pub fn new(id: EntityId, kind: PickupKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            ground_life: PICKUP_GROUND_LIFE,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(PICKUP_RADIUS))
    }
}

/// The always-present collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
}

impl Orb {
    pub fn spawn(rng: &mut impl Rng, playfield: &Playfield) -> Self {
        let mut orb = Self {
            pos: Vec2::ZERO,
            radius: ORB_RADIUS,
        };
        orb.respawn(rng, playfield);
        orb
    }

    /// Move to a new random position with the whole orb inside the playfield
    pub fn respawn(&mut self, rng: &mut impl Rng, playfield: &Playfield) {
        let r = self.radius;
        let x = rng.random_range(r..=(playfield.width - r).max(r));
        let y = rng.random_range(r..=(playfield.height - r).max(r));
        self.pos = Vec2::new(x, y);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }
}

/// Transient camera shake, consumed by presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub ticks: u32,
    pub magnitude: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, ticks: u32, magnitude: f32) {
        self.ticks = ticks;
        self.magnitude = magnitude;
    }

    pub fn decay(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.magnitude = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticks > 0
    }
}

/// Fire-and-forget notifications for audio/presentation, collected per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: EntityId },
    OrbCollected { at: Vec2 },
    HazardKilled { id: EntityId, at: Vec2, seeker: bool },
    PickupSpawned { id: EntityId, kind: PickupKind },
    PlayerDamaged {
        shielded: bool,
        shake_ticks: u32,
        shake_magnitude: f32,
    },
    PickupCollected { kind: PickupKind },
    BuffExpired { kind: BuffKind },
    NewHighScore { score: u64 },
    SessionOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub weapon: Weapon,
    pub orb: Orb,
    /// Live hazards in spawn order
    pub hazards: Vec<Hazard>,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Ground pickups in spawn order
    pub pickups: Vec<Pickup>,
    pub buffs: BuffRegistry,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleEmitter,
    /// Ticks since the last hazard spawn
    pub spawn_timer: u32,
    pub orbs_collected: u32,
    pub hazards_destroyed: u32,
    /// Accumulated kill bonus, kept apart from the time/orb formula
    pub kill_bonus: u64,
    pub score: u64,
    /// Best score known to this session (loaded at start, raised on game over)
    pub high_score: u64,
    /// Set when this session beat the previous high score; cleared once
    /// `new_high_timer` runs out
    pub new_high_score: bool,
    pub new_high_timer: u32,
    pub shake: ScreenShake,
    /// Notifications produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: EntityId,
}

impl GameState {
    /// Create a fresh session
    pub fn new(seed: u64, settings: &Settings, high_score: u64) -> Self {
        let playfield = Playfield::new(settings.playfield_width, settings.playfield_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let orb = Orb::spawn(&mut rng, &playfield);
        let center = Vec2::new(playfield.width, playfield.height) * 0.5;

        Self {
            seed,
            difficulty: settings.difficulty,
            playfield,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(1, center, settings.player_color),
            weapon: Weapon::default(),
            orb,
            hazards: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            buffs: BuffRegistry::new(),
            particles: ParticleEmitter::new(seed, settings.particles),
            spawn_timer: 0,
            orbs_collected: 0,
            hazards_destroyed: 0,
            kill_bonus: 0,
            score: 0,
            high_score,
            new_high_score: false,
            new_high_timer: 0,
            shake: ScreenShake::default(),
            events: Vec::new(),
            rng,
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Wall-clock seconds this session has been running
    pub fn elapsed_seconds(&self) -> f64 {
        self.time_ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// floor(elapsed_seconds * 10) + orbs * 100 + kill bonus.
    /// The time term uses integer math so exact tenths never round down.
    pub fn recompute_score(&mut self) {
        let time_points = self.time_ticks * 10 / TICKS_PER_SECOND;
        self.score = time_points + u64::from(self.orbs_collected) * ORB_SCORE + self.kill_bonus;
    }

    /// Position of a targetable entity, if it still exists
    pub fn resolve_target(&self, id: EntityId) -> Option<Vec2> {
        (id == self.player.id).then(|| self.player.center())
    }

    /// Count down presentation timers (shake, new high score banner).
    /// Runs on terminal ticks too.
    pub fn decay_presentation(&mut self) {
        self.shake.decay();
        if self.new_high_timer > 0 {
            self.new_high_timer -= 1;
            if self.new_high_timer == 0 {
                self.new_high_score = false;
            }
        }
    }

    /// Switch to GameOver once per session, raising the high score if beaten
    pub fn enter_game_over(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.phase = GamePhase::GameOver;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            self.new_high_timer = NEW_HIGH_SCORE_TICKS;
            self.particles
                .burst_confetti(self.player.center(), HIGH_SCORE_BURST);
            self.events.push(GameEvent::NewHighScore { score: self.score });
            log::info!("New high score: {}", self.score);
        }

        self.events.push(GameEvent::SessionOver { score: self.score });
        log::info!(
            "Session over after {:.1}s: score={}, orbs={}, kills={}",
            self.elapsed_seconds(),
            self.score,
            self.orbs_collected,
            self.hazards_destroyed
        );
    }
}
