//! Game state and level flow
//!
//! One `GameState` per session. Terrain is rebuilt on each level transition
//! and stays fixed while the level is played.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::lander::{Lander, LanderSpec};
use super::particles::ParticleSystem;
use super::rng::SimRng;
use super::terrain::{Bounds, Terrain, TerrainParams};
use super::units::{Measure, UnitScale};
use crate::settings::SimConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Countdown before the player gets control
    Transition,
    /// Active flight
    Playing,
    /// Game is paused
    Paused,
    /// Lander destroyed
    Lose,
    /// Landed, another level follows
    Win,
    /// Landed on the last level
    End,
}

/// Whether the lander is currently inside the safe touchdown envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingStatus {
    pub safe_speed: bool,
    pub safe_angle: bool,
}

impl LandingStatus {
    pub fn evaluate(lander: &Lander, units: &UnitScale, config: &SimConfig) -> Self {
        let speed = units.to_real(lander.speed(), Measure::Velocity);
        let tilt = lander.angle_y_axis().abs().to_degrees();
        Self {
            safe_speed: speed < config.safe_landing_speed,
            safe_angle: tilt < config.safe_landing_angle,
        }
    }

    pub fn is_safe(&self) -> bool {
        self.safe_speed && self.safe_angle
    }
}

/// Points for a safe landing: remaining fuel, weighted by level
pub fn landing_score(fuel: f32, level: u32) -> u64 {
    fuel.max(0.0).round() as u64 * 10 * level as u64
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Landing-zone and displacement bounds, fixed for the session
    pub bounds: Bounds,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Countdown remaining in `Transition` (ms)
    pub transition_ms: f32,
    /// Pixels-per-meter scale for the current level
    pub units: UnitScale,
    /// Terrain roughness for the current level
    pub roughness: f32,
    /// px/ms², pointing down the screen
    pub gravity: Vec2,
    pub terrain: Terrain,
    pub lander: Lander,
    /// Engine fire and crash fireball
    pub fire: ParticleSystem,
    /// Engine smoke and crash smoke
    pub smoke: ParticleSystem,
    /// Engine fired during the last tick
    pub thrust_applied: bool,
    /// Contact classification from the last tick
    pub last_collision: Collision,
    pub landing: LandingStatus,
    /// Score accumulated over the run
    pub score: u64,
    /// Simulated time (ms)
    pub time_ms: f64,
    /// Terrain generator stream
    rng: SimRng,
}

impl GameState {
    /// Create a session on level 1
    pub fn new(seed: u64, config: SimConfig, screen_width: f32, screen_height: f32) -> Self {
        let config = config.sanitized();
        let mut rng = SimRng::new(seed);
        let fire = ParticleSystem::new(config.effects.fire_rate, rng.fork());
        let smoke = ParticleSystem::new(config.effects.smoke_rate, rng.fork());
        let bounds = Bounds::from_screen(screen_width, screen_height, config.bounds_margin);
        let units = UnitScale::new(config.px_per_meter_base);

        let mut state = Self {
            seed,
            screen_width,
            screen_height,
            bounds,
            level: 0,
            phase: GamePhase::Transition,
            transition_ms: config.transition_ms,
            units,
            roughness: config.roughness(1.0),
            gravity: Vec2::ZERO,
            terrain: Terrain::default(),
            lander: Lander::new(LanderSpec {
                position: Vec2::ZERO,
                orientation: Vec2::Y,
                width: 0.0,
                height: 0.0,
                thrust_accel: 0.0,
                fuel_rate: 0.0,
                rotation_force: 0.0,
                thrust_damping: 0.0,
            }),
            fire,
            smoke,
            thrust_applied: false,
            last_collision: Collision::None,
            landing: LandingStatus::default(),
            score: 0,
            time_ms: 0.0,
            rng,
            config,
        };

        log::info!(
            "Game initialized with seed {} on {} ({} m/s²)",
            seed,
            state.config.body.as_str(),
            state.config.gravity_accel()
        );
        state.reload();
        state
    }

    /// Restart the run from level 1
    pub fn reload(&mut self) {
        self.level = 0;
        self.score = 0;
        self.fire.clear();
        self.smoke.clear();
        self.set_scale(1.0);
        self.new_level();
    }

    /// Move to the next level: new scale, fresh lander, new terrain
    pub fn new_level(&mut self) {
        self.level += 1;
        self.phase = GamePhase::Transition;
        self.transition_ms = self.config.transition_ms;
        self.thrust_applied = false;
        self.last_collision = Collision::None;

        let params = self.config.level(self.level);
        self.set_scale(params.scale);

        let terrain_params = TerrainParams {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            bounds: self.bounds,
            landing_zones: params.landing_zones,
            zone_width: self.lander.width * params.zone_width_factor,
            roughness: self.roughness,
            detail: self.config.terrain_detail,
            baseline: self.config.terrain_baseline,
            baseline_jitter: self.config.terrain_baseline_jitter,
        };
        self.terrain = Terrain::generate(&terrain_params, &mut self.rng);

        log::info!(
            "Level {}: scale={}, px/m={}, zones={}, roughness={:.2}",
            self.level,
            params.scale,
            self.units.px_per_meter,
            params.landing_zones,
            self.roughness
        );
    }

    /// Apply a map scale: unit conversion, roughness, gravity, lander size
    pub fn set_scale(&mut self, scale: f32) {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        self.roughness = self.config.roughness(scale);
        self.units = UnitScale::new(self.config.px_per_meter_base * scale);
        self.gravity = Vec2::new(
            0.0,
            self.units
                .to_virtual(self.config.gravity_accel(), Measure::Acceleration),
        );
        self.reset_lander();
    }

    /// Put a fresh lander at the start position
    pub fn reset_lander(&mut self) {
        let spec = self.lander_spec();
        self.lander.reset(spec);
        self.landing = LandingStatus::evaluate(&self.lander, &self.units, &self.config);
    }

    /// Lander parameters for the current scale
    pub fn lander_spec(&self) -> LanderSpec {
        let config = &self.config;
        let width = self
            .units
            .to_virtual(config.lander_width, Measure::Value)
            .floor()
            .max(1.0);
        let aspect = if config.lander_aspect_ratio > 0.0 {
            config.lander_aspect_ratio
        } else {
            1.0
        };
        let height = (width / aspect).floor().max(1.0);
        let thrust_accel = self
            .units
            .to_virtual(config.lander_thrust, Measure::Acceleration);

        LanderSpec {
            position: Vec2::new(
                self.screen_width * config.start_position[0],
                self.screen_height * config.start_position[1],
            ),
            orientation: Vec2::from(config.start_orientation),
            width,
            height,
            thrust_accel,
            fuel_rate: thrust_accel * config.fuel_rate_factor,
            rotation_force: config.rotation_force,
            thrust_damping: config.thrust_damping,
        }
    }

    /// "Continue" command: next level after a win, restart after a loss
    pub fn advance(&mut self) {
        match self.phase {
            GamePhase::Win => self.new_level(),
            GamePhase::Lose => self.reload(),
            _ => {}
        }
    }

    /// Safe-speed and safe-angle flags from the last tick, for the HUD
    pub fn landing_status(&self) -> LandingStatus {
        self.landing
    }

    /// Whether the current level is the last in the table
    pub fn is_last_level(&self) -> bool {
        self.level as usize >= self.config.level_count()
    }

    /// Lander speed (m/s)
    pub fn speed_real(&self) -> f32 {
        self.units.to_real(self.lander.speed(), Measure::Velocity)
    }

    /// Lander tilt from upright (degrees, unsigned)
    pub fn tilt_degrees(&self) -> f32 {
        self.lander.angle_y_axis().abs().to_degrees()
    }
}
