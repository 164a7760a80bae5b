//! Game settings and preferences
//!
//! Stored as JSON next to the high score. Anything missing or malformed falls
//! back to defaults; a bad settings file never prevents a session from starting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH, PLAYER_SIZE};
use crate::highscores::PersistError;
use crate::sim::PlayerColor;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::from_str(&s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using Normal", s);
            Difficulty::Normal
        })
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 0 for Easy, 1 for Normal, 2 for Hard
    pub fn tier(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Ticks between hazard spawns
    pub fn spawn_interval(&self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Normal => 60,
            Difficulty::Hard => 40,
        }
    }

    /// Drifter speed in units per tick
    pub fn hazard_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Normal => 4.0,
            Difficulty::Hard => 5.0,
        }
    }

    /// Seeker speed in units per tick
    pub fn seeker_speed(&self) -> f32 {
        2.0 + self.tier() as f32
    }

    /// Seekers only appear above Easy
    pub fn seekers_enabled(&self) -> bool {
        self.tier() >= 1
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Playfield (fixed for a session) ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Cosmetic ===
    pub player_color: PlayerColor,
    /// Particle effects (trails, confetti)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            player_color: PlayerColor::Yellow,
            particles: true,
        }
    }
}

impl Settings {
    /// Replace unusable playfield dimensions with the defaults.
    /// The playfield must at least fit the player.
    pub fn sanitized(mut self) -> Self {
        let usable = |v: f32| v.is_finite() && v >= PLAYER_SIZE;
        if !usable(self.playfield_width) || !usable(self.playfield_height) {
            log::warn!(
                "Invalid playfield {}x{}, using {}x{}",
                self.playfield_width,
                self.playfield_height,
                DEFAULT_PLAYFIELD_WIDTH,
                DEFAULT_PLAYFIELD_HEIGHT
            );
            self.playfield_width = DEFAULT_PLAYFIELD_WIDTH;
            self.playfield_height = DEFAULT_PLAYFIELD_HEIGHT;
        }
        self
    }

    /// Parse settings JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Settings unreadable ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(err) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
