//! Simulation settings and level table
//!
//! Every tunable constant of the flight model lives here so it can be
//! overridden from a JSON file. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Body the game is played on, which fixes gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpaceBody {
    Sun,
    Mercury,
    Venus,
    Earth,
    #[default]
    Moon,
    Mars,
    Jupiter,
    Titan,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl SpaceBody {
    pub const ALL: [SpaceBody; 12] = [
        SpaceBody::Sun,
        SpaceBody::Mercury,
        SpaceBody::Venus,
        SpaceBody::Earth,
        SpaceBody::Moon,
        SpaceBody::Mars,
        SpaceBody::Jupiter,
        SpaceBody::Titan,
        SpaceBody::Saturn,
        SpaceBody::Uranus,
        SpaceBody::Neptune,
        SpaceBody::Pluto,
    ];

    /// Surface gravity (m/s²)
    pub fn gravity(&self) -> f32 {
        match self {
            SpaceBody::Sun => 274.0,
            SpaceBody::Mercury => 3.70,
            SpaceBody::Venus => 8.87,
            SpaceBody::Earth => 9.82,
            SpaceBody::Moon => 1.62,
            SpaceBody::Mars => 3.73,
            SpaceBody::Jupiter => 25.92,
            SpaceBody::Titan => 1.35,
            SpaceBody::Saturn => 11.19,
            SpaceBody::Uranus => 9.01,
            SpaceBody::Neptune => 11.27,
            SpaceBody::Pluto => 0.62,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceBody::Sun => "Sun",
            SpaceBody::Mercury => "Mercury",
            SpaceBody::Venus => "Venus",
            SpaceBody::Earth => "Earth",
            SpaceBody::Moon => "Moon",
            SpaceBody::Mars => "Mars",
            SpaceBody::Jupiter => "Jupiter",
            SpaceBody::Titan => "Titan",
            SpaceBody::Saturn => "Saturn",
            SpaceBody::Uranus => "Uranus",
            SpaceBody::Neptune => "Neptune",
            SpaceBody::Pluto => "Pluto",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|b| b.as_str().to_lowercase() == s)
    }
}

/// One row of the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Map scale; pixels-per-meter is `px_per_meter_base * scale`
    pub scale: f32,
    /// Number of landing zones
    pub landing_zones: usize,
    /// Landing zone width as a multiple of the lander width
    pub zone_width_factor: f32,
}

impl LevelParams {
    pub const fn new(scale: f32, landing_zones: usize, zone_width_factor: f32) -> Self {
        Self {
            scale,
            landing_zones,
            zone_width_factor,
        }
    }
}

/// Default level table, easiest first
pub const DEFAULT_LEVELS: [LevelParams; 5] = [
    LevelParams::new(1.3, 2, 2.50),
    LevelParams::new(1.1, 1, 1.75),
    LevelParams::new(1.0, 2, 1.25),
    LevelParams::new(0.9, 2, 1.25),
    LevelParams::new(0.7, 1, 1.10),
];

/// Particle effect tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Particle effects on/off
    pub particles: bool,

    // === Exhaust ===
    /// Fire particles per ms of thrust
    pub fire_rate: f64,
    /// Fire speed as a multiple of thrust acceleration (px/ms per px/ms²)
    pub fire_speed_factor: f32,
    /// Fire particle size (m)
    pub fire_size: f32,
    /// Fire particle lifetime (ms)
    pub fire_lifetime: f32,
    /// Smoke particles per ms of thrust
    pub smoke_rate: f64,
    pub smoke_speed_factor: f32,
    pub smoke_size: f32,
    pub smoke_lifetime: f32,

    // === Crash ===
    pub crash_fire_count: usize,
    /// Crash fire speed (m/s)
    pub crash_fire_speed: f32,
    /// Crash fire size (m)
    pub crash_fire_size: f32,
    pub crash_fire_lifetime: f32,
    pub crash_smoke_count: usize,
    pub crash_smoke_speed: f32,
    pub crash_smoke_size: f32,
    pub crash_smoke_lifetime: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            particles: true,

            fire_rate: 0.5,
            fire_speed_factor: 10_000.0,
            fire_size: 1.0,
            fire_lifetime: 150.0,
            smoke_rate: 0.05,
            smoke_speed_factor: 500.0,
            smoke_size: 4.0,
            smoke_lifetime: 3000.0,

            crash_fire_count: 5000,
            crash_fire_speed: 15.0,
            crash_fire_size: 3.0,
            crash_fire_lifetime: 1500.0,
            crash_smoke_count: 1000,
            crash_smoke_speed: 5.0,
            crash_smoke_size: 5.0,
            crash_smoke_lifetime: 5500.0,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub body: SpaceBody,

    // === Terrain ===
    /// Horizontal distance (px) between terrain vertices, higher is less detailed
    pub terrain_detail: f32,
    /// Fraction of the screen the bounds sit away from each edge
    pub bounds_margin: f32,
    /// Terrain starts this fraction of the way down the screen
    pub terrain_baseline: f32,
    /// Std dev of the baseline offset as a fraction of screen height
    pub terrain_baseline_jitter: f32,
    /// Roughness is `roughness_base / scale`, clamped
    pub roughness_base: f32,
    pub roughness_min: f32,
    pub roughness_max: f32,

    // === Scale ===
    /// Pixels per meter at level scale 1.0
    pub px_per_meter_base: f32,

    // === Lander ===
    /// Lander width (m)
    pub lander_width: f32,
    /// Width / height of the lander hull
    pub lander_aspect_ratio: f32,
    /// Engine acceleration (m/s²)
    pub lander_thrust: f32,
    /// Fuel %/ms is thrust acceleration (px/ms²) times this factor
    pub fuel_rate_factor: f32,
    /// Angular acceleration per rotate command (rad/ms²)
    pub rotation_force: f32,
    /// Fraction of angular velocity removed per ms of thrust
    pub thrust_damping: f32,
    /// Start position as fractions of screen width and height
    pub start_position: [f32; 2],
    /// Start heading in y-up coordinates
    pub start_orientation: [f32; 2],

    // === Landing ===
    /// Maximum touchdown speed (m/s)
    pub safe_landing_speed: f32,
    /// Maximum touchdown tilt (degrees)
    pub safe_landing_angle: f32,

    // === Flow ===
    /// Countdown before control is granted (ms)
    pub transition_ms: f32,

    pub effects: EffectsConfig,
    pub levels: Vec<LevelParams>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            body: SpaceBody::Moon,

            terrain_detail: 10.0,
            bounds_margin: 0.15,
            terrain_baseline: 0.66,
            terrain_baseline_jitter: 0.1,
            roughness_base: 0.40,
            roughness_min: 0.25,
            roughness_max: 0.70,

            px_per_meter_base: 5.0,

            lander_width: 9.4,
            lander_aspect_ratio: 0.8,
            lander_thrust: 15.0,
            fuel_rate_factor: 300.0,
            rotation_force: 1.5e-6,
            thrust_damping: 0.001,
            start_position: [0.35, 0.05],
            start_orientation: [1.0, 0.0],

            safe_landing_speed: 2.0,
            safe_landing_angle: 5.0,

            transition_ms: 3000.0,

            effects: EffectsConfig::default(),
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl SimConfig {
    /// Gravity of the configured body (m/s²)
    pub fn gravity_accel(&self) -> f32 {
        self.body.gravity()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len().max(1)
    }

    /// Level table entry for a 1-based level number, clamped into the table
    pub fn level(&self, level: u32) -> LevelParams {
        let table: &[LevelParams] = if self.levels.is_empty() {
            &DEFAULT_LEVELS
        } else {
            &self.levels
        };
        let idx = (level.max(1) as usize - 1).min(table.len() - 1);
        table[idx]
    }

    /// Roughness factor for a level scale
    pub fn roughness(&self, scale: f32) -> f32 {
        let lo = self.roughness_min.min(self.roughness_max);
        let hi = self.roughness_max.max(self.roughness_min);
        (self.roughness_base / scale).clamp(lo, hi)
    }

    /// Replace an empty level table with the defaults
    pub fn sanitized(mut self) -> Self {
        if self.levels.is_empty() {
            log::warn!("Level table is empty, using the default levels");
            self.levels = DEFAULT_LEVELS.to_vec();
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<SimConfig>(&json) {
                Ok(config) => {
                    log::info!("Loaded settings from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
