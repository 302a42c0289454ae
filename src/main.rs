//! Farol - a maze chase simulation core.
//!
//! Farol is the headless heart of a spotlight maze game: a player fleeing
//! through static wall geometry, an enemy pursuing by direct seek or by
//! replaying the player's own delayed footsteps, and doors that sink into
//! the floor when the overhead beam finds their detectors. Rendering,
//! asset decoding, and device input stay outside; the core exposes a
//! render trigger, a logical input-flag map, and a persistence capability
//! for high scores.
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `app/`: tick driver, cadence throttling, asset and input pumping
//! - `game/`: collision, movement, pursuit, reveal, and scoring logic
//! - `maze/`: static level geometry and spawn data
//! - `math/`: vector utilities shared by the game systems
//!
//! # Usage
//! Run with `cargo run`. The binary drives a scripted demo walk through
//! the default level; `RUST_LOG=debug` shows per-tick detail. Ctrl-C
//! stops the loop and flushes high scores.

pub mod app;
pub mod assets;
pub mod benchmarks;
pub mod config;
pub mod demo;
pub mod game;
pub mod math;
pub mod maze;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use crate::app::App;
use crate::config::TuningConfig;
use crate::game::enemy::PursuitPolicy;
use crate::game::score::FileScoreStore;

/// How many ticks the scripted demo runs before exiting on its own.
const DEMO_TICKS: u64 = 300;

/// Builds the run configuration, letting a few environment variables
/// override the defaults:
///
/// - `FAROL_PURSUIT`: `seek` or `replay`
/// - `FAROL_REPLAY_DELAY_MS`: milliseconds between replay consumptions
/// - `FAROL_PUZZLE`: `off` disables the door-reveal mechanic
fn config_from_env() -> TuningConfig {
    let mut config = TuningConfig::default();

    if let Ok(policy) = std::env::var("FAROL_PURSUIT") {
        match policy.as_str() {
            "seek" => config.set_pursuit_policy(PursuitPolicy::DirectSeek),
            "replay" => config.set_pursuit_policy(PursuitPolicy::HistoryReplay),
            other => warn!("unknown FAROL_PURSUIT value {other:?}, keeping default"),
        }
    }
    if let Ok(delay) = std::env::var("FAROL_REPLAY_DELAY_MS") {
        match delay.parse() {
            Ok(ms) => config.set_replay_delay_ms(ms),
            Err(_) => warn!("unparseable FAROL_REPLAY_DELAY_MS value {delay:?}"),
        }
    }
    if let Ok(puzzle) = std::env::var("FAROL_PUZZLE") {
        config.set_puzzle_mode(puzzle != "off");
    }

    config
}

fn main() {
    env_logger::init();

    let running = Arc::new(AtomicBool::new(true));
    let ctrlc_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        ctrlc_flag.store(false, Ordering::SeqCst);
    })
    .expect("failed to install shutdown handler");

    let config = config_from_env();
    let store = FileScoreStore::new("farol-data");

    let mut app = App::new(
        config,
        Box::new(store),
        Box::new(|state, report| {
            // Stand-in renderer: surface the committed world state.
            if report.caught {
                info!(
                    "run over, final score {}",
                    report.final_score.unwrap_or_default()
                );
            } else if state.tick % 10 == 0 && state.tick > 0 {
                let enemy_position = state
                    .enemy
                    .as_ref()
                    .map(|enemy| *enemy.transform.position.as_array());
                info!(
                    "tick {:>4}  player {:?}  enemy {:?}  score {}",
                    state.tick,
                    state.player.transform.position.as_array(),
                    enemy_position,
                    state.score,
                );
            }
        }),
    );

    app.run(|iteration, input| {
        demo::pump(iteration, input);
        running.load(Ordering::SeqCst) && iteration < DEMO_TICKS
    });

    info!("high scores: {:?}", app.state.high_scores.scores());
}
