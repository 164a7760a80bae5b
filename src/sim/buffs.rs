//! Timed buffs granted by pickups
//!
//! The registry holds at most one timer per kind. Re-collecting a kind that is
//! already active replaces its timer with a fresh full duration; durations
//! never stack. A timer that reaches zero is reverted and removed in the same
//! tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{PickupKind, Player, Weapon};
use crate::consts::{HEALTH_PICKUP_HEAL, PLAYER_MIN_SPEED, TICKS_PER_SECOND};

/// Speed buff bonus and ceiling
pub const SPEED_BUFF_BONUS: f32 = 2.0;
pub const SPEED_BUFF_CAP: f32 = 12.0;

/// Timed buff types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    RapidFire,
    Shield,
    Speed,
    Damage,
}

impl BuffKind {
    pub fn duration_secs(self) -> u32 {
        match self {
            BuffKind::RapidFire => 6,
            BuffKind::Shield => 6,
            BuffKind::Speed => 5,
            BuffKind::Damage => 6,
        }
    }

    pub fn duration_ticks(self) -> u32 {
        self.duration_secs() * TICKS_PER_SECOND as u32
    }
}

/// Remaining and originally granted ticks for one buff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffTimer {
    pub remaining: u32,
    pub total: u32,
}

impl BuffTimer {
    /// Fraction of the buff left, for HUD bars
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.remaining as f32 / self.total as f32
        }
    }
}

/// Active buffs, iterated in a stable kind order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuffRegistry {
    entries: BTreeMap<BuffKind, BuffTimer>,
}

impl BuffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a buff at its full duration
    pub fn grant(&mut self, kind: BuffKind) {
        let ticks = kind.duration_ticks();
        self.entries.insert(
            kind,
            BuffTimer {
                remaining: ticks,
                total: ticks,
            },
        );
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn get(&self, kind: BuffKind) -> Option<BuffTimer> {
        self.entries.get(&kind).copied()
    }

    pub fn remaining(&self, kind: BuffKind) -> u32 {
        self.get(kind).map(|t| t.remaining).unwrap_or(0)
    }

    /// Fraction of `kind` left in [0, 1]; 0 when inactive
    pub fn progress(&self, kind: BuffKind) -> f32 {
        self.get(kind).map(|t| t.progress()).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuffKind, BuffTimer)> + '_ {
        self.entries.iter().map(|(k, t)| (*k, *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a collected pickup to the player and weapon
    pub fn apply_pickup(&mut self, kind: PickupKind, player: &mut Player, weapon: &mut Weapon) {
        let Some(buff) = kind.buff() else {
            player.heal(HEALTH_PICKUP_HEAL);
            return;
        };

        self.grant(buff);
        match buff {
            // Cooldown is derived from the registry when firing
            BuffKind::RapidFire => {}
            BuffKind::Shield => player.invulnerable = true,
            BuffKind::Speed => {
                player.speed = (player.base_speed + SPEED_BUFF_BONUS).min(SPEED_BUFF_CAP);
            }
            BuffKind::Damage => weapon.damage = (weapon.base_damage * 2).max(1),
        }
    }

    /// Count every buff down by one tick, reverting and removing expired ones.
    /// Returns the kinds that expired, in kind order.
    pub fn tick(&mut self, player: &mut Player, weapon: &mut Weapon) -> Vec<BuffKind> {
        let mut expired = Vec::new();
        self.entries.retain(|kind, timer| {
            timer.remaining = timer.remaining.saturating_sub(1);
            if timer.remaining == 0 {
                expired.push(*kind);
                false
            } else {
                true
            }
        });

        for &kind in &expired {
            revert(kind, player, weapon);
        }
        expired
    }
}

fn revert(kind: BuffKind, player: &mut Player, weapon: &mut Weapon) {
    match kind {
        BuffKind::RapidFire => {}
        BuffKind::Shield => player.invulnerable = false,
        BuffKind::Speed => player.speed = player.base_speed.max(PLAYER_MIN_SPEED),
        BuffKind::Damage => weapon.damage = weapon.base_damage,
    }
}
