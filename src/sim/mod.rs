//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or persistence dependencies

pub mod autopilot;
pub mod buffs;
pub mod collision;
pub mod hazard;
pub mod particles;
pub mod state;
pub mod tick;

pub use buffs::{BuffKind, BuffRegistry, BuffTimer};
pub use collision::{Aabb, Playfield, direction_toward};
pub use particles::{Particle, ParticleEmitter};
pub use state::{
    EntityId, GameEvent, GamePhase, GameState, Hazard, HazardKind, Orb, Pickup, PickupKind,
    Player, PlayerColor, Projectile, ScreenShake, Weapon,
};
pub use tick::{TickInput, tick};
