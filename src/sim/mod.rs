//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is consumed synchronously, once per frame
//! - Seeded RNG only
//! - Fixed per-frame order: physics, collision, state transition, particles
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod lander;
pub mod line;
pub mod particles;
pub mod rng;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod units;

pub use collision::{Collision, Touchdown, detect, resolve_contact};
pub use lander::{Lander, LanderSpec};
pub use line::LineSegment;
pub use particles::{EmitParams, Emission, Particle, ParticleSystem};
pub use rng::SimRng;
pub use state::{GamePhase, GameState, LandingStatus};
pub use terrain::{Bounds, Terrain, TerrainParams, subdivide};
pub use tick::{TickInput, tick};
pub use units::{Measure, UnitScale};
