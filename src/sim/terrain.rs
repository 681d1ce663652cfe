//! Procedural terrain via random midpoint displacement
//!
//! The playfield is split into one column per landing zone. Each zone is a flat
//! segment placed somewhere in its column; the rough ground between zones (and
//! out to both screen edges) is subdivided recursively, nudging each midpoint
//! by a Gaussian amount proportional to the segment width.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::line::LineSegment;
use super::rng::SimRng;
use crate::consts::MIN_TERRAIN_DETAIL;

/// Region where landing zones may start and terrain may be displaced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Bounds {
    /// Bounds inset from the screen edges by `margin` (fraction of each dimension)
    ///
    /// The top bound sits an extra 10% lower to leave room for the lander's entry.
    pub fn from_screen(width: f32, height: f32, margin: f32) -> Self {
        Self {
            top: (height * (margin + 0.1)).floor(),
            bottom: (height * (1.0 - margin)).floor(),
            left: (width * margin).floor(),
            right: (width * (1.0 - margin)).floor(),
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Everything the generator needs for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    pub screen_width: f32,
    pub screen_height: f32,
    pub bounds: Bounds,
    pub landing_zones: usize,
    /// Width of each landing zone (px)
    pub zone_width: f32,
    /// Surface roughness factor, higher is more jagged
    pub roughness: f32,
    /// Horizontal extent (px) below which segments are not subdivided
    pub detail: f32,
    /// Baseline height as a fraction of screen height
    pub baseline: f32,
    /// Std dev of the baseline offset as a fraction of screen height
    pub baseline_jitter: f32,
}

/// Terrain for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    /// Contiguous segments from x = 0 to x = screen width
    pub segments: Vec<LineSegment>,
    /// Indices into `segments` of the flat landing zones, ascending
    pub landing_zones: Vec<usize>,
    /// y-level the outer edges start from
    pub baseline: f32,
}

impl Terrain {
    /// Assemble terrain from prebuilt segments
    pub fn from_parts(segments: Vec<LineSegment>, landing_zones: Vec<usize>) -> Self {
        let baseline = segments.first().map(|s| s.start.y).unwrap_or_default();
        Self {
            segments,
            landing_zones,
            baseline,
        }
    }

    /// Build a fresh terrain for a level
    pub fn generate(params: &TerrainParams, rng: &mut SimRng) -> Self {
        let width = params.screen_width;
        let height = params.screen_height;
        let bounds = params.bounds;

        // Vary overall altitude per level, kept inside the vertical bounds
        let jitter = height * params.baseline_jitter * rng.gaussian_f32(0.0, 1.0);
        let baseline = (height * params.baseline + jitter)
            .floor()
            .clamp(bounds.top, bounds.bottom);

        let zone_count = params.landing_zones;
        let mut zones = Vec::with_capacity(zone_count * 2 + 1);
        let mut prev_end = Vec2::new(0.0, baseline);

        for i in 0..zone_count {
            let n = zone_count as f32;
            let left = bounds.left + (i as f32 / n) * bounds.width();
            let right = bounds.right - ((zone_count - i - 1) as f32 / n) * bounds.width();

            let x = rng
                .range(left, right - params.zone_width)
                .max(prev_end.x);
            let y = rng.range(bounds.top, bounds.bottom);
            let zone_start = Vec2::new(x, y);
            let zone_end = Vec2::new((x + params.zone_width).min(width), y);

            zones.push((LineSegment::new(prev_end, zone_start), false));
            zones.push((LineSegment::new(zone_start, zone_end), true));
            prev_end = zone_end;
        }
        zones.push((LineSegment::new(prev_end, Vec2::new(width, baseline)), false));

        let mut segments = Vec::new();
        let mut landing_zones = Vec::with_capacity(zone_count);
        for (line, is_landing_zone) in zones {
            if is_landing_zone {
                landing_zones.push(segments.len());
                segments.push(line);
            } else {
                subdivide(
                    line,
                    params.detail,
                    params.roughness,
                    (bounds.top, height),
                    rng,
                    &mut segments,
                );
            }
        }

        log::info!(
            "Terrain built: {} segments, {} landing zones, baseline y={}",
            segments.len(),
            landing_zones.len(),
            baseline
        );

        Self {
            segments,
            landing_zones,
            baseline,
        }
    }

    /// Whether the segment at `index` is a landing zone
    pub fn is_landing_zone(&self, index: usize) -> bool {
        self.landing_zones.binary_search(&index).is_ok()
    }

    /// Landing-zone segments in left-to-right order
    pub fn landing_zone_segments(&self) -> impl Iterator<Item = &LineSegment> {
        self.landing_zones.iter().filter_map(|&i| self.segments.get(i))
    }
}

/// Random midpoint displacement of a single segment, appended to `out` left-to-right
///
/// A midpoint is displaced by `roughness * N(0, 1) * half_width` only when the
/// result stays inside `[top, bottom)`; otherwise that midpoint is left as-is and
/// subdivision continues. Runs on an explicit stack so depth is bounded by
/// memory, not the call stack.
pub fn subdivide(
    line: LineSegment,
    detail: f32,
    roughness: f32,
    (top, bottom): (f32, f32),
    rng: &mut SimRng,
    out: &mut Vec<LineSegment>,
) {
    let detail = detail.max(MIN_TERRAIN_DETAIL);
    let mut stack = vec![line];

    while let Some(line) = stack.pop() {
        if line.dist_x() <= detail {
            out.push(line);
            continue;
        }

        let (mut first, mut second) = line.split();
        // f32 spacing at large x can leave the midpoint on an endpoint
        let mid_x = first.end.x;
        if !(mid_x > line.start.x && mid_x < line.end.x) {
            out.push(line);
            continue;
        }

        let disp = roughness * rng.gaussian_f32(0.0, 1.0) * first.dist_x();
        let y = first.end.y + disp;
        if y >= top && y < bottom {
            first.displace_y(disp, false);
            second.displace_y(disp, true);
        }

        // LIFO: push the right half first so the left half is emitted first
        stack.push(second);
        stack.push(first);
    }
}
