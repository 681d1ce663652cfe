//! Particle effects for engine exhaust and crash debris
//!
//! Live particles are kept in a dense arena. Removal swaps the last particle
//! into the freed slot, so iteration order is not stable across updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::{angle_to_direction, direction_to_angle};

/// Std dev of the exhaust angle around the requested direction (rad)
pub const THRUST_ANGLE_SPREAD: f32 = std::f32::consts::PI / 16.0;
/// Relative std dev of speed for exhaust particles
pub const THRUST_SPEED_SPREAD: f32 = 0.5;
/// Relative std dev of size for exhaust particles
pub const THRUST_SIZE_SPREAD: f32 = 0.3;
/// Relative std dev of lifetime for exhaust particles
pub const THRUST_LIFETIME_SPREAD: f32 = 0.25;

/// Burst speed mean as a multiple of the base speed
pub const BURST_SPEED_MEAN: f32 = 1.5;
/// Relative std dev of speed, size and lifetime for burst particles
pub const BURST_SPREAD: f32 = 0.5;

/// Rotation accumulated per px of travel (rad)
pub const ROTATION_PER_PX: f32 = 1.0 / 16.0;

/// A single short-lived particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub center: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub direction: Vec2,
    /// px/ms
    pub speed: f32,
    /// ms
    pub lifetime: f32,
    /// ms alive so far
    pub alive: f32,
}

impl Particle {
    /// Advance by `elapsed` ms. Returns false once the particle has expired.
    pub fn update(&mut self, elapsed: f32) -> bool {
        self.alive += elapsed;
        self.center += self.direction * self.speed * elapsed;
        self.rotation += self.speed * elapsed * ROTATION_PER_PX;
        self.alive < self.lifetime
    }
}

/// Emission mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    /// Continuous plume; count derives from elapsed time and the emission rate
    Thrust { elapsed: f32 },
    /// Fixed number of particles flung in all directions
    Burst { count: usize },
}

/// Base values particles are perturbed around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitParams {
    pub origin: Vec2,
    /// Plume direction; ignored by bursts
    pub direction: Vec2,
    /// px/ms
    pub speed: f32,
    /// px
    pub size: f32,
    /// ms
    pub lifetime: f32,
}

/// Owner of a set of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    /// Particles per ms for thrust emission
    emission_rate: f64,
    /// Total thrust time (ms) since the last `clear`
    thrust_ms: f64,
    /// Thrust particles emitted over `thrust_ms`
    thrust_emitted: u64,
    next_id: u64,
    rng: SimRng,
}

impl ParticleSystem {
    pub fn new(emission_rate: f64, rng: SimRng) -> Self {
        Self {
            particles: Vec::new(),
            emission_rate: emission_rate.max(0.0),
            thrust_ms: 0.0,
            thrust_emitted: 0,
            next_id: 0,
            rng,
        }
    }

    /// Live particles, in no particular order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn emission_rate(&self) -> f64 {
        self.emission_rate
    }

    pub fn get(&self, id: u64) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Remove every particle and forget any owed emission
    pub fn clear(&mut self) {
        self.particles.clear();
        self.thrust_ms = 0.0;
        self.thrust_emitted = 0;
    }

    /// Add one particle with exact values, returning its id
    pub fn spawn(&mut self, center: Vec2, direction: Vec2, speed: f32, size: f32, lifetime: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            center,
            size,
            rotation: 0.0,
            direction: direction.normalize_or_zero(),
            speed,
            lifetime,
            alive: 0.0,
        });
        id
    }

    /// Emit particles, returning how many were created
    pub fn emit(&mut self, kind: Emission, params: &EmitParams) -> usize {
        match kind {
            Emission::Thrust { elapsed } => self.emit_thrust(elapsed, params),
            Emission::Burst { count } => self.emit_burst(count, params),
        }
    }

    /// Exhaust plume for `elapsed` ms of thrust
    ///
    /// Emits whatever brings the running total up to `floor(rate * thrust_ms)`,
    /// so no fraction is lost or double counted however the time is split.
    pub fn emit_thrust(&mut self, elapsed: f32, params: &EmitParams) -> usize {
        self.thrust_ms += elapsed.max(0.0) as f64;
        let owed = (self.emission_rate * self.thrust_ms).floor() as u64;
        let count = owed.saturating_sub(self.thrust_emitted);
        self.thrust_emitted += count;
        let count = count as usize;

        let base_angle = direction_to_angle(params.direction);
        for _ in 0..count {
            let angle = self.rng.gaussian_f32(base_angle, THRUST_ANGLE_SPREAD);
            let speed = self
                .rng
                .gaussian_f32(params.speed, params.speed * THRUST_SPEED_SPREAD)
                .abs();
            let size = self
                .rng
                .gaussian_f32(params.size, params.size * THRUST_SIZE_SPREAD)
                .abs();
            let lifetime = self
                .rng
                .gaussian_f32(params.lifetime, params.lifetime * THRUST_LIFETIME_SPREAD)
                .abs();
            self.spawn(params.origin, angle_to_direction(angle), speed, size, lifetime);
        }
        count
    }

    /// Debris burst of `count` particles in uniformly random directions
    pub fn emit_burst(&mut self, count: usize, params: &EmitParams) -> usize {
        self.particles.reserve(count);
        for _ in 0..count {
            let direction = self.rng.circle_vector();
            let mean_speed = params.speed * BURST_SPEED_MEAN;
            let speed = self
                .rng
                .gaussian_f32(mean_speed, mean_speed * BURST_SPREAD)
                .abs();
            let size = self
                .rng
                .gaussian_f32(params.size, params.size * BURST_SPREAD)
                .abs();
            let lifetime = self
                .rng
                .gaussian_f32(params.lifetime, params.lifetime * BURST_SPREAD)
                .abs();
            self.spawn(params.origin, direction, speed, size, lifetime);
        }
        count
    }

    /// Age and move every particle, dropping the expired ones
    pub fn update(&mut self, elapsed: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].update(elapsed) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> EmitParams {
        EmitParams {
            origin: Vec2::new(100.0, 100.0),
            direction: Vec2::Y,
            speed: 0.2,
            size: 4.0,
            lifetime: 500.0,
        }
    }

    #[test]
    fn test_spawn_ids_increase() {
        let mut system = ParticleSystem::new(0.0, SimRng::new(1));
        let a = system.spawn(Vec2::ZERO, Vec2::X, 1.0, 1.0, 10.0);
        let b = system.spawn(Vec2::ZERO, Vec2::X, 1.0, 1.0, 10.0);
        assert!(b > a);
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn test_particle_expires_at_lifetime() {
        let mut system = ParticleSystem::new(0.0, SimRng::new(1));
        let id = system.spawn(Vec2::ZERO, Vec2::X, 0.1, 2.0, 1500.0);

        system.update(1000.0);
        system.update(499.0);
        assert!(system.get(id).is_some());

        system.update(1.0);
        assert!(system.get(id).is_none());
        assert!(system.is_empty());
    }

    #[test]
    fn test_update_moves_and_spins() {
        let mut system = ParticleSystem::new(0.0, SimRng::new(1));
        let id = system.spawn(Vec2::ZERO, Vec2::new(3.0, 0.0), 0.5, 2.0, 1000.0);
        system.update(10.0);
        let p = system.get(id).unwrap();
        assert!((p.center - Vec2::new(5.0, 0.0)).length() < 1e-5);
        assert!(p.rotation > 0.0);
    }

    #[test]
    fn test_removal_keeps_survivors() {
        let mut system = ParticleSystem::new(0.0, SimRng::new(1));
        let short = system.spawn(Vec2::ZERO, Vec2::X, 0.0, 1.0, 10.0);
        let long_a = system.spawn(Vec2::ZERO, Vec2::X, 0.0, 1.0, 100.0);
        let long_b = system.spawn(Vec2::ZERO, Vec2::X, 0.0, 1.0, 100.0);
        system.update(20.0);
        assert!(system.get(short).is_none());
        assert!(system.get(long_a).is_some());
        assert!(system.get(long_b).is_some());
    }

    #[test]
    fn test_thrust_carry_over() {
        // 0.25 per ms: 3 ms frames emit 0, 1, 0, 1 ... never drifting
        let mut system = ParticleSystem::new(0.25, SimRng::new(4));
        let total: usize = (0..40)
            .map(|_| system.emit(Emission::Thrust { elapsed: 3.0 }, &params()))
            .sum();
        assert_eq!(total, 30);
        assert_eq!(system.len(), 30);
    }

    #[test]
    fn test_thrust_plume_follows_direction() {
        let mut system = ParticleSystem::new(1.0, SimRng::new(9));
        system.emit_thrust(200.0, &params());
        let mean = system
            .particles()
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.direction)
            / system.len() as f32;
        // Plume points down (+y) on average
        assert!(mean.y > 0.9, "mean direction {mean:?}");
        assert!(system.particles().iter().all(|p| p.speed >= 0.0 && p.size >= 0.0));
    }

    #[test]
    fn test_burst_emits_exact_count() {
        let mut system = ParticleSystem::new(0.0, SimRng::new(2));
        let n = system.emit(Emission::Burst { count: 250 }, &params());
        assert_eq!(n, 250);
        assert_eq!(system.len(), 250);
        assert!(
            system
                .particles()
                .iter()
                .all(|p| (p.direction.length() - 1.0).abs() < 1e-4)
        );
    }

    #[test]
    fn test_thrust_tenths_do_not_drift() {
        // 0.1 summed ten times is just under 1.0 in f64
        let mut system = ParticleSystem::new(0.1, SimRng::new(5));
        let total: usize = (0..10).map(|_| system.emit_thrust(1.0, &params())).sum();
        assert_eq!(total, 1);

        let mut system = ParticleSystem::new(0.1, SimRng::new(5));
        let total: usize = (0..1000).map(|_| system.emit_thrust(1.0, &params())).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_clear_resets_carry_over() {
        let mut system = ParticleSystem::new(0.5, SimRng::new(2));
        system.emit_thrust(1.0, &params());
        system.clear();
        assert!(system.is_empty());
        assert_eq!(system.emit_thrust(1.0, &params()), 0);
    }
}
