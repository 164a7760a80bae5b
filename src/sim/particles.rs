//! Cosmetic particles
//!
//! Particles never influence gameplay. They draw from their own RNG stream so
//! toggling them off leaves hazard spawns and pickup drops unchanged.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Playfield;
use crate::consts::MAX_PARTICLES;

/// Confetti palette
const CONFETTI_COLORS: [u32; 5] = [0xFF5050, 0x50FF78, 0x50C8FF, 0xFFC850, 0xC878FF];

/// Downward pull applied to every particle each tick
const PARTICLE_GRAVITY: f32 = 0.06;
/// Velocity kept (and flipped) when bouncing off an edge
const EDGE_BOUNCE: f32 = -0.6;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub color: u32,
}

/// Owns live particles and their RNG
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    rng: Pcg32,
    enabled: bool,
}

impl ParticleEmitter {
    pub fn new(seed: u64, enabled: bool) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            enabled,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Exhaust puffs behind a moving player, tinted by remaining energy
    pub fn emit_trail(&mut self, at: Vec2, intent: Vec2, energy_ratio: f32) {
        if !self.enabled {
            return;
        }
        let count = self.rng.random_range(2..=5);
        for _ in 0..count {
            let color = if energy_ratio > 0.6 {
                let green = self.rng.random_range(200..=255u32);
                let blue = self.rng.random_range(100..=180u32);
                0xFF0000 | (green << 8) | blue
            } else if energy_ratio > 0.3 {
                0x960000 | (self.rng.random_range(100..=180u32) << 8) | 0xFF
            } else {
                0xC832C8
            };
            let jitter = Vec2::new(
                self.rng.random_range(-2.0..=2.0),
                self.rng.random_range(-2.0..=2.0),
            );
            self.particles.push(Particle {
                pos: at,
                vel: jitter - intent * 0.3,
                life: self.rng.random_range(20..=35),
                color,
            });
        }
        self.enforce_cap();
    }

    /// Celebratory burst in all directions
    pub fn burst_confetti(&mut self, at: Vec2, count: usize) {
        if !self.enabled {
            return;
        }
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(2.0..=6.0);
            let vel = Vec2::new(
                angle.cos() * speed + self.rng.random_range(-1.0..=1.0),
                angle.sin() * speed + self.rng.random_range(-2.0..=1.0),
            );
            let color = CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())];
            self.particles.push(Particle {
                pos: at,
                vel,
                life: self.rng.random_range(40..=80),
                color,
            });
        }
        self.enforce_cap();
    }

    /// Advance every particle one tick and drop dead ones
    pub fn update(&mut self, playfield: &Playfield) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life = p.life.saturating_sub(1);
            if p.pos.x <= 0.0 || p.pos.x >= playfield.width {
                p.vel.x *= EDGE_BOUNCE;
            }
            if p.pos.y <= 0.0 || p.pos.y >= playfield.height {
                p.vel.y *= EDGE_BOUNCE;
            }
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // Oldest particles go first
    fn enforce_cap(&mut self) {
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }
}
