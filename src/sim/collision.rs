//! Collision detection between the lander hull and terrain
//!
//! Every terrain segment is tested against every hull edge. Terrain contact wins
//! over landing-zone contact: a landing-zone hit is remembered while the scan
//! continues, a terrain hit returns immediately.

use serde::{Deserialize, Serialize};

use super::line::LineSegment;
use super::terrain::Terrain;

/// What the hull is touching this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    None,
    LandingZone,
    Terrain,
}

/// Outcome of a contact once landing thresholds are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touchdown {
    Landed,
    Crashed,
}

/// Classify hull contact against the terrain
pub fn detect(hull_edges: &[LineSegment], terrain: &Terrain) -> Collision {
    let mut collision = Collision::None;

    for (index, terrain_line) in terrain.segments.iter().enumerate() {
        let hit = hull_edges.iter().any(|edge| edge.intersects(terrain_line));
        if !hit {
            continue;
        }
        if terrain.is_landing_zone(index) {
            // Keep scanning, another segment may be plain terrain
            collision = Collision::LandingZone;
        } else {
            return Collision::Terrain;
        }
    }

    collision
}

/// Decide whether a contact is a landing or a crash
///
/// A landing-zone contact only counts as landed when both the speed and the
/// tilt are under their thresholds.
pub fn resolve_contact(collision: Collision, safe_speed: bool, safe_angle: bool) -> Option<Touchdown> {
    match collision {
        Collision::None => None,
        Collision::Terrain => Some(Touchdown::Crashed),
        Collision::LandingZone if safe_speed && safe_angle => Some(Touchdown::Landed),
        Collision::LandingZone => Some(Touchdown::Crashed),
    }
}
