//! LightRunner - a fixed-tick arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, buffs, scoring)
//! - `engine`: Session lifecycle around the simulation (reset, tick, high score)
//! - `highscores`: Single-value high score persistence
//! - `settings`: Difficulty, playfield and cosmetic preferences

pub mod engine;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore, PersistError};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate; every frame-based counter assumes this
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default playfield dimensions
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_MIN_SPEED: f32 = 1.0;
    pub const MAX_ENERGY: f32 = 100.0;
    pub const ENERGY_DRAIN_PER_TICK: f32 = 0.1;
    pub const TRAIL_CAPACITY: usize = 40;

    /// Shooting
    pub const BASE_SHOOT_COOLDOWN: u32 = 12;
    pub const MIN_SHOOT_COOLDOWN: u32 = 2;
    pub const BASE_PROJECTILE_DAMAGE: u32 = 1;
    pub const PROJECTILE_SPEED: f32 = 12.0;
    pub const PROJECTILE_LIFE: u32 = 90;
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    /// Projectiles are dropped once their center is this far outside the playfield
    pub const PROJECTILE_MARGIN: f32 = 50.0;

    /// Hazards
    pub const HAZARD_MARGIN: f32 = 100.0;
    pub const DRIFTER_MIN_EXTENT: u32 = 20;
    pub const DRIFTER_MAX_EXTENT: u32 = 60;
    pub const SEEKER_MIN_EXTENT: u32 = 24;
    pub const SEEKER_MAX_EXTENT: u32 = 40;
    pub const DRIFTER_HP: i32 = 1;
    pub const SEEKER_HP: i32 = 3;
    pub const SEEKER_SPAWN_CHANCE: f64 = 0.2;
    pub const HAZARD_CONTACT_DAMAGE: f32 = 20.0;
    pub const KILL_BONUS: u64 = 150;
    pub const PICKUP_DROP_CHANCE: f64 = 0.15;

    /// Orb
    pub const ORB_RADIUS: f32 = 15.0;
    pub const ORB_HEAL: f32 = 20.0;
    pub const ORB_SCORE: u64 = 100;

    /// Pickups (ground life is 12 seconds)
    pub const PICKUP_RADIUS: f32 = 14.0;
    pub const PICKUP_GROUND_LIFE: u32 = 12 * 60;
    pub const HEALTH_PICKUP_HEAL: f32 = 35.0;

    /// Screen shake on player hit
    pub const SHAKE_TICKS: u32 = 18;
    pub const SHAKE_MAGNITUDE: f32 = 8.0;

    /// How long the new high score banner stays up (2 seconds)
    pub const NEW_HIGH_SCORE_TICKS: u32 = 2 * 60;

    /// Particle bursts
    pub const MAX_PARTICLES: usize = 512;
    pub const KILL_BURST: usize = 12;
    pub const PICKUP_BURST: usize = 12;
    pub const HIGH_SCORE_BURST: usize = 60;
}
