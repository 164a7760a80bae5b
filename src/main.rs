//! LightRunner headless runner
//!
//! Plays one session with the built-in autopilot and reports the result.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use lightrunner::sim::autopilot;
use lightrunner::{Difficulty, Engine, JsonFileStore, Settings};

/// Run a LightRunner session without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Easy, Normal or Hard (overrides the settings file)
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Session seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many ticks even if the session is still running
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// High score file
    #[arg(long, default_value = "highscore.json")]
    highscore: PathBuf,

    /// Settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,
}

/// End-of-run report
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    difficulty: &'static str,
    ticks: u64,
    seconds: f64,
    score: u64,
    high_score: u64,
    new_high_score: bool,
    orbs_collected: u32,
    hazards_destroyed: u32,
    energy: f32,
    game_over: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(verbose: bool) {
    use env_logger::{Builder, Env};

    let level = if verbose { "debug" } else { "info" };
    // Fails only if a logger is already installed
    let _ = Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging(_verbose: bool) {}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(name) = args.difficulty.as_deref() {
        settings.difficulty = Difficulty::from_str(name).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using Normal", name);
            Difficulty::Normal
        });
    }

    let store = JsonFileStore::new(&args.highscore);
    let mut engine = Engine::new(settings, Box::new(store), args.seed);

    for _ in 0..args.ticks {
        let input = autopilot::plan(engine.state());
        if engine.tick(&input) {
            break;
        }
    }

    let state = engine.state();
    let summary = Summary {
        seed: state.seed,
        difficulty: state.difficulty.as_str(),
        ticks: state.time_ticks,
        seconds: state.elapsed_seconds(),
        score: state.score,
        high_score: state.high_score,
        new_high_score: state.new_high_score,
        orbs_collected: state.orbs_collected,
        hazards_destroyed: state.hazards_destroyed,
        energy: state.player.energy,
        game_over: state.is_terminal(),
    };

    log::info!(
        "Finished after {} ticks: score={} high={} orbs={} kills={}",
        summary.ticks,
        summary.score,
        summary.high_score,
        summary.orbs_collected,
        summary.hazards_destroyed
    );

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to encode summary: {}", err),
        }
    }
}
