//! Real-world (m, m/s, m/s²) to virtual-world (px, px/ms, px/ms²) scaling

use serde::{Deserialize, Serialize};

/// Dimension of a physical quantity
///
/// The discriminant is the power of 1000 (ms per second) in the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    /// Length: m <-> px
    Value = 0,
    /// m/s <-> px/ms
    Velocity = 1,
    /// m/s² <-> px/ms²
    Acceleration = 2,
}

impl Measure {
    #[inline]
    fn time_factor(self) -> f32 {
        1000_f32.powi(self as i32)
    }
}

/// Per-level pixels-per-meter scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub px_per_meter: f32,
}

impl UnitScale {
    pub const fn new(px_per_meter: f32) -> Self {
        Self { px_per_meter }
    }

    /// Real-world value to screen units
    #[inline]
    pub fn to_virtual(&self, value: f32, measure: Measure) -> f32 {
        value * self.px_per_meter / measure.time_factor()
    }

    /// Screen units to a real-world value
    #[inline]
    pub fn to_real(&self, value: f32, measure: Measure) -> f32 {
        value / self.px_per_meter * measure.time_factor()
    }
}
