//! Line segment primitive for terrain and lander hull geometry

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D line segment from `start` to `end`
///
/// Terrain segments are built left-to-right, so `start.x <= end.x` holds for
/// everything the terrain generator produces. Hull edges carry no such ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Horizontal extent (signed, `end.x - start.x`)
    #[inline]
    pub fn dist_x(&self) -> f32 {
        self.end.x - self.start.x
    }

    /// Point halfway between the endpoints
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.end - self.start) / 2.0 + self.start
    }

    /// Split at the midpoint; the halves share the midpoint vertex
    pub fn split(&self) -> (LineSegment, LineSegment) {
        let mid = self.midpoint();
        (
            LineSegment::new(self.start, mid),
            LineSegment::new(mid, self.end),
        )
    }

    /// Move one endpoint vertically by `disp`
    pub fn displace_y(&mut self, disp: f32, start: bool) {
        let offset = Vec2::new(0.0, disp);
        if start {
            self.start += offset;
        } else {
            self.end += offset;
        }
    }

    /// Orientation-based intersection test
    ///
    /// Collinear overlap is not handled: two segments lying on the same line
    /// are reported as not intersecting.
    pub fn intersects(&self, other: &LineSegment) -> bool {
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        // All-collinear falls through as o1 == o2
        o1 != o2 && o3 != o4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triplet (p, q, r) from the sign of the cross product
fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let cross = (q - p).perp_dot(r - q);
    if cross == 0.0 {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}
