//! Session lifecycle
//!
//! [`Engine`] owns one [`GameState`] plus the settings and high score store it
//! was built from. It is the only place persistence happens; the simulation
//! itself stays pure and deterministic.

use crate::highscores::{self, HighScoreStore};
use crate::settings::Settings;
use crate::sim::{
    BuffRegistry, GameEvent, GameState, Hazard, Orb, Particle, Pickup, Player, Projectile,
    TickInput, tick,
};

/// A running game session
pub struct Engine {
    settings: Settings,
    store: Box<dyn HighScoreStore>,
    seed: u64,
    state: GameState,
}

impl Engine {
    /// Start a session, loading the best score from `store`
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let settings = settings.sanitized();
        let high_score = highscores::load_or_default(store.as_ref());
        let state = GameState::new(seed, &settings, high_score);
        log::info!(
            "Session started: seed={} difficulty={} playfield={}x{}",
            seed,
            settings.difficulty.as_str(),
            settings.playfield_width,
            settings.playfield_height
        );
        Self {
            settings,
            store,
            seed,
            state,
        }
    }

    /// Throw away the session and start over with the same seed.
    /// The high score carries over.
    pub fn reset(&mut self) {
        self.reset_with_seed(self.seed);
    }

    /// Start over with a new seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        let high_score = self.state.high_score;
        self.seed = seed;
        self.state = GameState::new(seed, &self.settings, high_score);
        log::info!("Session reset: seed={}", seed);
    }

    /// Advance one tick. Returns true once the session is over.
    pub fn tick(&mut self, input: &TickInput) -> bool {
        let terminal = tick(&mut self.state, input);

        let beaten = self.state.events.iter().find_map(|event| match event {
            GameEvent::NewHighScore { score } => Some(*score),
            _ => None,
        });
        if let Some(score) = beaten {
            if let Err(err) = self.store.save(score) {
                log::warn!("Failed to save high score {}: {}", score, err);
            }
        }

        terminal
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn energy(&self) -> f32 {
        self.state.player.energy
    }

    pub fn orbs_collected(&self) -> u32 {
        self.state.orbs_collected
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn buffs(&self) -> &BuffRegistry {
        &self.state.buffs
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.state.hazards
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.state.projectiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.state.pickups
    }

    pub fn particles(&self) -> &[Particle] {
        self.state.particles.particles()
    }

    pub fn orb(&self) -> &Orb {
        &self.state.orb
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    /// Notifications from the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{MemoryStore, PersistError};
    use crate::sim::GamePhase;

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&self) -> Result<u64, PersistError> {
            Err(PersistError::Io(std::io::Error::other("disk on fire")))
        }

        fn save(&mut self, _score: u64) -> Result<(), PersistError> {
            Err(PersistError::Io(std::io::Error::other("disk on fire")))
        }
    }

    fn engine(store: impl HighScoreStore + 'static) -> Engine {
        Engine::new(Settings::default(), Box::new(store), 5)
    }

    #[test]
    fn test_new_loads_high_score() {
        let engine = engine(MemoryStore::with_score(900));
        assert_eq!(engine.high_score(), 900);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.energy(), 100.0);
        assert!(!engine.is_terminal());
    }

    #[test]
    fn test_new_high_score_is_persisted_on_game_over() {
        let mut engine = engine(MemoryStore::with_score(10));
        engine.state.orbs_collected = 3;
        engine.state.player.energy = 0.05;
        engine.state.hazards.clear();

        assert!(engine.tick(&TickInput::default()));
        assert_eq!(engine.state().phase, GamePhase::GameOver);
        assert!(engine.state().new_high_score);
        assert_eq!(engine.high_score(), engine.score());
        assert_eq!(engine.store().load().expect("load"), engine.score());
        assert!(engine
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::SessionOver { .. })));
    }

    #[test]
    fn test_unbeaten_high_score_is_not_written() {
        let mut engine = engine(MemoryStore::with_score(1_000_000));
        engine.state.player.energy = 0.05;
        assert!(engine.tick(&TickInput::default()));
        assert!(!engine.state().new_high_score);
        assert_eq!(engine.store().load().expect("load"), 1_000_000);
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let mut engine = engine(FailingStore);
        assert_eq!(engine.high_score(), 0);
        engine.state.orbs_collected = 1;
        engine.state.player.energy = 0.05;
        assert!(engine.tick(&TickInput::default()));
        assert!(engine.state().new_high_score);
        assert!(engine.tick(&TickInput::default()));
    }

    #[test]
    fn test_reset_keeps_high_score_and_seed() {
        let mut engine = engine(MemoryStore::new());
        engine.state.orbs_collected = 2;
        engine.state.player.energy = 0.05;
        engine.tick(&TickInput::default());
        let best = engine.high_score();
        assert!(best > 0);

        engine.reset();
        assert_eq!(engine.seed(), 5);
        assert_eq!(engine.high_score(), best);
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_terminal());
        assert!(engine.events().is_empty());

        engine.reset_with_seed(77);
        assert_eq!(engine.seed(), 77);
        assert_eq!(engine.state().seed, 77);
    }
}
