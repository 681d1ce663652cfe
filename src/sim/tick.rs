//! Per-frame simulation tick
//!
//! Runs once per rendered frame, in a fixed order: input commands and physics,
//! collision detection, state transition, particles.

use super::collision::{Touchdown, detect, resolve_contact};
use super::particles::{EmitParams, Emission};
use super::state::{GamePhase, GameState, LandingStatus, landing_score};
use super::units::Measure;

/// Commands for a single frame
///
/// Produced by an external input-mapping layer; the simulation never reads
/// raw keyboard state.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Engine held this frame
    pub thrust: bool,
    pub rotate_clockwise: bool,
    pub rotate_counter_clockwise: bool,
    /// Pause toggle
    pub pause: bool,
    /// Continue after a win or loss
    pub advance: bool,
}

/// Advance the game state by `elapsed` ms
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) {
    let elapsed = elapsed.max(0.0);

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at {:.0} ms", state.time_ms);
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ms += elapsed as f64;

    if state.phase == GamePhase::Transition {
        state.transition_ms -= elapsed;
        if state.transition_ms < 0.0 {
            state.phase = GamePhase::Playing;
            log::info!("Level {} go", state.level);
        }
    }

    let playing = state.phase == GamePhase::Playing;
    if playing {
        let lander = &mut state.lander;
        lander.velocity += state.gravity * elapsed;
        if input.thrust {
            lander.thrust(elapsed);
        }
        if input.rotate_clockwise {
            lander.rotate(elapsed, true);
        }
        if input.rotate_counter_clockwise {
            lander.rotate(elapsed, false);
        }
        state.thrust_applied = lander.using_thrust();
        lander.update(elapsed);
    }

    state.landing = LandingStatus::evaluate(&state.lander, &state.units, &state.config);

    if playing {
        let collision = detect(&state.lander.hull_edges(), &state.terrain);
        state.last_collision = collision;
        match resolve_contact(collision, state.landing.safe_speed, state.landing.safe_angle) {
            Some(Touchdown::Landed) => on_landed(state),
            Some(Touchdown::Crashed) => on_crashed(state),
            None => {}
        }
    }

    if state.thrust_applied && state.config.effects.particles {
        emit_exhaust(state, elapsed);
    }

    state.fire.update(elapsed);
    state.smoke.update(elapsed);

    if input.advance {
        state.advance();
    }
}

fn on_landed(state: &mut GameState) {
    state.lander.landed = true;
    state.thrust_applied = false;

    let points = landing_score(state.lander.fuel(), state.level);
    state.score += points;

    state.phase = if state.is_last_level() {
        GamePhase::End
    } else {
        GamePhase::Win
    };
    log::info!(
        "Landed on level {}: speed {:.2} m/s, tilt {:.2}°, +{} points (total {})",
        state.level,
        state.speed_real(),
        state.tilt_degrees(),
        points,
        state.score
    );
}

fn on_crashed(state: &mut GameState) {
    state.lander.destroyed = true;
    state.thrust_applied = false;
    state.phase = GamePhase::Lose;

    log::info!("Lander destroyed on level {} ({:?})", state.level, state.last_collision);
    log::debug!(
        "Crash speed {:.2} m/s, tilt {:.2}°",
        state.speed_real(),
        state.tilt_degrees()
    );

    if !state.config.effects.particles {
        return;
    }

    let fx = &state.config.effects;
    let units = state.units;
    let origin = state.lander.position;

    state.fire.emit(
        Emission::Burst {
            count: fx.crash_fire_count,
        },
        &EmitParams {
            origin,
            direction: state.lander.direction(),
            speed: units.to_virtual(fx.crash_fire_speed, Measure::Velocity),
            size: units.to_virtual(fx.crash_fire_size, Measure::Value),
            lifetime: fx.crash_fire_lifetime,
        },
    );
    state.smoke.emit(
        Emission::Burst {
            count: fx.crash_smoke_count,
        },
        &EmitParams {
            origin,
            direction: state.lander.direction(),
            speed: units.to_virtual(fx.crash_smoke_speed, Measure::Velocity),
            size: units.to_virtual(fx.crash_smoke_size, Measure::Value),
            lifetime: fx.crash_smoke_lifetime,
        },
    );
}

/// Fire and smoke leaving the base of the hull, opposite the heading
fn emit_exhaust(state: &mut GameState, elapsed: f32) {
    let fx = &state.config.effects;
    let units = state.units;
    let origin = state.lander.thrust_point();
    let direction = -state.lander.direction();
    let accel = state.lander.thrust_accel;

    state.fire.emit(
        Emission::Thrust { elapsed },
        &EmitParams {
            origin,
            direction,
            speed: accel * fx.fire_speed_factor,
            size: units.to_virtual(fx.fire_size, Measure::Value),
            lifetime: fx.fire_lifetime,
        },
    );
    state.smoke.emit(
        Emission::Thrust { elapsed },
        &EmitParams {
            origin,
            direction,
            speed: accel * fx.smoke_speed_factor,
            size: units.to_virtual(fx.smoke_size, Measure::Value),
            lifetime: fx.smoke_lifetime,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::settings::SimConfig;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, SimConfig::default(), SCREEN_WIDTH, SCREEN_HEIGHT);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_transition_counts_down_to_playing() {
        let mut state = GameState::new(1, SimConfig::default(), SCREEN_WIDTH, SCREEN_HEIGHT);
        let start = state.lander.position;
        tick(&mut state, &TickInput::default(), 2000.0);
        assert_eq!(state.phase, GamePhase::Transition);
        // No physics during the countdown
        assert_eq!(state.lander.position, start);
        tick(&mut state, &TickInput::default(), 1001.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut state = playing_state(2);
        let y = state.lander.position.y;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.lander.velocity.y > 0.0);
        assert!(state.lander.position.y > y);
    }

    #[test]
    fn test_thrust_burns_fuel_and_emits() {
        let mut state = playing_state(3);
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert!(state.lander.fuel() < 100.0);
        assert!(state.thrust_applied);
        assert!(!state.fire.is_empty());
    }

    #[test]
    fn test_rotation_commands() {
        let mut state = playing_state(4);
        let input = TickInput {
            rotate_clockwise: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert!(state.lander.angular_velocity > 0.0);

        let input = TickInput {
            rotate_counter_clockwise: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        tick(&mut state, &input, FRAME_MS);
        assert!(state.lander.angular_velocity < 0.0);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing_state(5);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Paused);

        let position = state.lander.position;
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.lander.position, position);

        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.lander.position, position);
    }

    #[test]
    fn test_free_fall_ends_in_crash() {
        let mut state = playing_state(6);
        for _ in 0..10_000 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        // Sideways start never satisfies the tilt threshold
        assert_eq!(state.phase, GamePhase::Lose);
        assert!(state.lander.destroyed);
        assert!(!state.fire.is_empty());
        assert!(!state.smoke.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state(777);
        let mut b = playing_state(777);
        let inputs = [
            TickInput {
                thrust: true,
                ..Default::default()
            },
            TickInput {
                rotate_counter_clockwise: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in inputs.iter().cycle().take(60) {
            tick(&mut a, input, FRAME_MS);
            tick(&mut b, input, FRAME_MS);
        }
        assert_eq!(a.lander.position, b.lander.position);
        assert_eq!(a.fire.len(), b.fire.len());
        assert_eq!(a.phase, b.phase);
    }
}
