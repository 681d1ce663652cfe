//! Lunar Lander headless driver
//!
//! Runs the simulation with a simple autopilot at a fixed frame rate, logs each
//! level's outcome and records the final score.
//!
//! Run `lunar-lander --help` for options.

use std::path::PathBuf;

use clap::Parser;

use lunar_lander::consts::{FRAME_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use lunar_lander::highscores::{HighScores, now_timestamp};
use lunar_lander::settings::SimConfig;
use lunar_lander::sim::{GamePhase, GameState, TickInput, tick};

/// Command-line options
#[derive(Debug, Parser)]
#[command(version, about = "Headless lunar lander run with a simple autopilot", long_about = None)]
struct Options {
    /// Run seed (terrain and particle effects)
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Settings json file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// High score json file path
    #[arg(long, value_name = "FILE", default_value = "lunar_scores.json")]
    scores: PathBuf,

    /// Name recorded with the score
    #[arg(long, default_value = "Autopilot")]
    name: String,

    /// Frames to simulate before giving up (60 per second)
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_frames: u64,
}

/// Steers toward upright, then meters thrust to keep the descent slow
fn autopilot(state: &GameState) -> TickInput {
    let lander = &state.lander;
    let tilt = lander.angle_y_axis();

    // Angular velocity that would bring the tilt to zero in about a second
    let target_spin = -tilt / 1000.0;
    let spin = lander.angular_velocity;
    let rotate_clockwise = spin < target_spin - 1e-5;
    let rotate_counter_clockwise = spin > target_spin + 1e-5;

    let descent = state
        .units
        .to_real(lander.velocity.y, lunar_lander::sim::Measure::Velocity);
    let upright = tilt.abs().to_degrees() < 20.0;
    let thrust = upright && descent > 0.6 * state.config.safe_landing_speed;

    TickInput {
        thrust,
        rotate_clockwise,
        rotate_counter_clockwise,
        ..Default::default()
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    log::info!("Lunar Lander starting...");

    let config = options
        .config
        .as_ref()
        .map(SimConfig::load)
        .unwrap_or_default();
    let mut state = GameState::new(options.seed, config, SCREEN_WIDTH, SCREEN_HEIGHT);

    let mut frames = 0u64;
    let mut best_level = state.level;
    while frames < options.max_frames {
        frames += 1;
        let mut input = autopilot(&state);

        match state.phase {
            GamePhase::Win => input.advance = true,
            GamePhase::Lose | GamePhase::End => break,
            _ => {}
        }

        tick(&mut state, &input, FRAME_MS);
        best_level = best_level.max(state.level);

        if frames % 600 == 0 {
            log::debug!(
                "t={:.1}s level={} phase={:?} fuel={:.1}% speed={:.2} m/s tilt={:.1}° particles={}",
                state.time_ms / 1000.0,
                state.level,
                state.phase,
                state.lander.fuel(),
                state.speed_real(),
                state.tilt_degrees(),
                state.fire.len() + state.smoke.len()
            );
        }
    }

    log::info!(
        "Run finished after {} frames: phase {:?}, level {}, score {}",
        frames,
        state.phase,
        best_level,
        state.score
    );

    let mut scores = HighScores::load(&options.scores);
    if let Some(rank) = scores.add_score(&options.name, state.score, best_level, now_timestamp()) {
        log::info!("New high score for level {}: rank {}", best_level, rank);
        if let Err(e) = scores.save(&options.scores) {
            log::error!("Failed to save high scores: {}", e);
        }
    }
}
