//! Lander flight model
//!
//! Units are screen units throughout: px, px/ms, px/ms², rad/ms. The y axis
//! points down, so "up" is `(0, -1)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::line::LineSegment;
use crate::consts::{FUEL_FULL, HULL_BASE_INSET};
use crate::{angle_to_direction, direction_to_angle, normalize_angle};

/// Parameters a lander is (re)initialized from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanderSpec {
    pub position: Vec2,
    /// Initial heading in y-up coordinates, need not be normalized
    pub orientation: Vec2,
    pub width: f32,
    pub height: f32,
    /// Thrust acceleration (px/ms²)
    pub thrust_accel: f32,
    /// Fuel burned per ms of thrust (percent)
    pub fuel_rate: f32,
    /// Angular acceleration from one rotate command (rad/ms²)
    pub rotation_force: f32,
    /// Fraction of angular velocity removed per ms of thrust
    pub thrust_damping: f32,
}

/// The player's lander
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lander {
    pub position: Vec2,
    /// px/ms
    pub velocity: Vec2,
    /// rad/ms, positive turns clockwise on screen
    pub angular_velocity: f32,
    direction: Vec2,
    fuel: f32,
    pub width: f32,
    pub height: f32,
    pub thrust_accel: f32,
    fuel_rate: f32,
    rotation_force: f32,
    thrust_damping: f32,
    /// Set by `thrust`, cleared by `update`
    using_thrust: bool,
    pub destroyed: bool,
    pub landed: bool,
}

impl Lander {
    pub fn new(spec: LanderSpec) -> Self {
        let mut lander = Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            direction: Vec2::NEG_Y,
            fuel: FUEL_FULL,
            width: 0.0,
            height: 0.0,
            thrust_accel: 0.0,
            fuel_rate: 0.0,
            rotation_force: 0.0,
            thrust_damping: 0.0,
            using_thrust: false,
            destroyed: false,
            landed: false,
        };
        lander.reset(spec);
        lander
    }

    /// Restore a fresh lander: full fuel, at rest, flags cleared
    pub fn reset(&mut self, spec: LanderSpec) {
        self.destroyed = false;
        self.landed = false;
        self.position = spec.position;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        // Flip into screen space
        let orientation = Vec2::new(spec.orientation.x, -spec.orientation.y);
        self.direction = orientation.try_normalize().unwrap_or(Vec2::NEG_Y);
        self.fuel = FUEL_FULL;
        self.fuel_rate = spec.fuel_rate;
        self.width = spec.width;
        self.height = spec.height;
        self.thrust_accel = spec.thrust_accel;
        self.rotation_force = spec.rotation_force;
        self.thrust_damping = spec.thrust_damping;
        self.using_thrust = false;
    }

    /// Unit heading the engine pushes along
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Remaining fuel, 0 to 100
    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    /// Whether thrust was applied since the last `update`
    pub fn using_thrust(&self) -> bool {
        self.using_thrust
    }

    /// px/ms
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Heading measured from the +x axis
    pub fn angle_x_axis(&self) -> f32 {
        direction_to_angle(self.direction)
    }

    /// Tilt away from upright; 0 when pointing straight up, positive leaning right
    pub fn angle_y_axis(&self) -> f32 {
        direction_to_angle(Vec2::new(-self.direction.y, self.direction.x))
    }

    /// Point the lander `tilt` radians away from upright
    pub fn set_tilt(&mut self, tilt: f32) {
        self.direction = angle_to_direction(tilt - std::f32::consts::FRAC_PI_2);
    }

    /// Fire the engine for `elapsed` ms
    ///
    /// No-op once the tank is empty. Thrust also bleeds off angular velocity.
    pub fn thrust(&mut self, elapsed: f32) {
        if self.fuel <= 0.0 {
            return;
        }
        self.velocity += self.thrust_accel * self.direction * elapsed;
        self.angular_velocity -= self.angular_velocity * self.thrust_damping * elapsed;
        self.using_thrust = true;
        self.fuel = (self.fuel - self.fuel_rate * elapsed).max(0.0);
    }

    /// Apply a rotation impulse for `elapsed` ms
    pub fn rotate(&mut self, elapsed: f32, clockwise: bool) {
        let change = self.rotation_force * elapsed;
        if clockwise {
            self.angular_velocity += change;
        } else {
            self.angular_velocity -= change;
        }
    }

    /// Integrate position and heading over `elapsed` ms
    pub fn update(&mut self, elapsed: f32) {
        self.position += self.velocity * elapsed;
        let angle = normalize_angle(self.angle_x_axis() + self.angular_velocity * elapsed);
        self.direction = angle_to_direction(angle);
        self.using_thrust = false;
    }

    /// Hull corners in order: top-left, top-right, bottom-right, bottom-left
    ///
    /// The bottom edge sits closer to the center than the top edge so the
    /// exhaust lines up with the base of the sprite.
    pub fn corners(&self) -> [Vec2; 4] {
        let angle = self.angle_x_axis() + std::f32::consts::FRAC_PI_2;
        let (sin, cos) = angle.sin_cos();
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let base_h = half_h - self.height * HULL_BASE_INSET;
        let p = self.position;

        let bl = Vec2::new(
            p.x - half_w * cos - base_h * sin,
            p.y - half_w * sin + base_h * cos,
        );
        let br = Vec2::new(
            p.x + half_w * cos - base_h * sin,
            p.y + half_w * sin + base_h * cos,
        );
        let tr = Vec2::new(
            p.x + half_w * cos + half_h * sin,
            p.y + half_w * sin - half_h * cos,
        );
        let tl = Vec2::new(
            p.x - half_w * cos + half_h * sin,
            p.y - half_w * sin - half_h * cos,
        );
        [tl, tr, br, bl]
    }

    /// The four hull edges, each corner joined to the next
    pub fn hull_edges(&self) -> [LineSegment; 4] {
        let c = self.corners();
        std::array::from_fn(|i| LineSegment::new(c[i], c[(i + 1) % 4]))
    }

    /// Midpoint of the hull's bottom edge, where the exhaust leaves
    pub fn thrust_point(&self) -> Vec2 {
        let c = self.corners();
        LineSegment::new(c[2], c[3]).midpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn spec() -> LanderSpec {
        LanderSpec {
            position: Vec2::new(100.0, 100.0),
            orientation: Vec2::new(0.0, 1.0),
            width: 40.0,
            height: 50.0,
            thrust_accel: 1e-4,
            fuel_rate: 0.03,
            rotation_force: 1.5e-6,
            thrust_damping: 0.001,
        }
    }

    #[test]
    fn test_reset_flips_orientation_into_screen_space() {
        let lander = Lander::new(spec());
        assert!((lander.direction() - Vec2::NEG_Y).length() < 1e-6);
        assert!(lander.angle_y_axis().abs() < 1e-6);
        assert_eq!(lander.fuel(), FUEL_FULL);
    }

    #[test]
    fn test_sideways_start_has_right_angle_tilt() {
        let lander = Lander::new(LanderSpec {
            orientation: Vec2::new(1.0, 0.0),
            ..spec()
        });
        assert!((lander.angle_y_axis() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_accelerates_along_direction() {
        let mut lander = Lander::new(spec());
        lander.thrust(10.0);
        assert!(lander.velocity.y < 0.0);
        assert!(lander.velocity.x.abs() < 1e-9);
        assert!(lander.using_thrust());
        assert!((lander.fuel() - (FUEL_FULL - 0.3)).abs() < 1e-4);
        lander.update(10.0);
        assert!(!lander.using_thrust());
    }

    #[test]
    fn test_fuel_never_negative_and_empty_tank_is_noop() {
        let mut lander = Lander::new(spec());
        for _ in 0..1000 {
            lander.thrust(16.0);
        }
        assert_eq!(lander.fuel(), 0.0);
        let velocity = lander.velocity;
        lander.thrust(16.0);
        assert_eq!(lander.velocity, velocity);
        assert_eq!(lander.fuel(), 0.0);
    }

    #[test]
    fn test_thrust_damps_rotation() {
        let mut lander = Lander::new(spec());
        lander.rotate(100.0, true);
        let spin = lander.angular_velocity;
        assert!(spin > 0.0);
        lander.thrust(100.0);
        assert!((lander.angular_velocity - spin * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_direction() {
        let mut lander = Lander::new(spec());
        lander.rotate(1000.0, true);
        lander.update(100.0);
        // Clockwise on screen leans the nose to the right
        assert!(lander.angle_y_axis() > 0.0);
        assert!((lander.direction().length() - 1.0).abs() < 1e-5);

        let mut lander = Lander::new(spec());
        lander.rotate(1000.0, false);
        lander.update(100.0);
        assert!(lander.angle_y_axis() < 0.0);
    }

    #[test]
    fn test_update_integrates_position() {
        let mut lander = Lander::new(spec());
        lander.velocity = Vec2::new(0.5, -0.25);
        lander.update(4.0);
        assert!((lander.position - Vec2::new(102.0, 99.0)).length() < 1e-5);
    }

    #[test]
    fn test_upright_corners() {
        let lander = Lander::new(spec());
        let [tl, tr, br, bl] = lander.corners();
        // Top edge 25 px above center, bottom edge 20 px below
        assert!((tl - Vec2::new(80.0, 75.0)).length() < 1e-4);
        assert!((tr - Vec2::new(120.0, 75.0)).length() < 1e-4);
        assert!((br - Vec2::new(120.0, 120.0)).length() < 1e-4);
        assert!((bl - Vec2::new(80.0, 120.0)).length() < 1e-4);
        assert!((lander.thrust_point() - Vec2::new(100.0, 120.0)).length() < 1e-4);
    }

    #[test]
    fn test_hull_edges_are_closed() {
        let mut lander = Lander::new(spec());
        lander.set_tilt(0.3);
        let edges = lander.hull_edges();
        for i in 0..4 {
            assert_eq!(edges[i].end, edges[(i + 1) % 4].start);
        }
        assert!((lander.angle_y_axis() - 0.3).abs() < 1e-5);
    }
}
