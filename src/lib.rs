//! Lunar Lander - simulation core for a 2D lander arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, flight physics, collisions, particles)
//! - `mesh`: Terrain vertex/index buffers for a renderer
//! - `settings`: Tunable constants and level table
//! - `highscores`: Per-level score records persisted as JSON

pub mod highscores;
pub mod mesh;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{LevelParams, SimConfig, SpaceBody};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time (ms) for a 60 Hz loop
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default backbuffer dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Fuel is a percentage
    pub const FUEL_FULL: f32 = 100.0;

    /// Fraction of the lander height the hull's bottom edge is pulled toward the center
    pub const HULL_BASE_INSET: f32 = 0.1;

    /// Smallest horizontal extent a terrain segment may be subdivided to (px)
    pub const MIN_TERRAIN_DETAIL: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Unit direction for an angle measured from the +x axis
#[inline]
pub fn angle_to_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a direction measured from the +x axis
#[inline]
pub fn direction_to_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_direction_angle_inverse() {
        for angle in [-2.5_f32, -1.0, 0.0, 0.3, 1.2, 3.0] {
            let back = direction_to_angle(angle_to_direction(angle));
            assert!((back - angle).abs() < 1e-5, "{angle} -> {back}");
        }
    }
}
