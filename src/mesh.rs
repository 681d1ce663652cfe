//! Terrain mesh for rendering
//!
//! The terrain is drawn as a triangle strip "curtain" hanging from each
//! vertex of the terrain line down to the bottom of the screen.

use bytemuck::{Pod, Zeroable};

use crate::sim::Terrain;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for terrain
pub mod colors {
    /// Terrain surface (dark orange)
    pub const TERRAIN_TOP: [f32; 4] = [1.0, 0.549, 0.0, 1.0];
    /// Screen bottom (dark red)
    pub const TERRAIN_BOTTOM: [f32; 4] = [0.545, 0.0, 0.0, 1.0];
}

/// Vertex and index buffers for a terrain curtain
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// One (bottom, top) pair per terrain vertex, left to right
    pub fn from_terrain(terrain: &Terrain, screen_height: f32) -> Self {
        let Some(last) = terrain.segments.last() else {
            return Self::default();
        };

        let points = terrain
            .segments
            .iter()
            .map(|s| s.start)
            .chain(std::iter::once(last.end));

        let mut vertices = Vec::with_capacity(2 * (terrain.segments.len() + 1));
        for p in points {
            vertices.push(Vertex::new(p.x, screen_height, colors::TERRAIN_BOTTOM));
            vertices.push(Vertex::new(p.x, p.y, colors::TERRAIN_TOP));
        }
        let indices = (0..vertices.len() as u32).collect();

        Self { vertices, indices }
    }

    /// Triangles in the strip
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// Raw vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LineSegment;
    use glam::Vec2;

    fn terrain() -> Terrain {
        Terrain::from_parts(
            vec![
                LineSegment::new(Vec2::new(0.0, 500.0), Vec2::new(100.0, 450.0)),
                LineSegment::new(Vec2::new(100.0, 450.0), Vec2::new(200.0, 450.0)),
                LineSegment::new(Vec2::new(200.0, 450.0), Vec2::new(300.0, 520.0)),
            ],
            vec![1],
        )
    }

    #[test]
    fn test_curtain_pairs() {
        let mesh = TerrainMesh::from_terrain(&terrain(), 720.0);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices, (0..8).collect::<Vec<u32>>());
        assert_eq!(mesh.triangle_count(), 6);

        assert_eq!(mesh.vertices[0].position, [0.0, 720.0]);
        assert_eq!(mesh.vertices[1].position, [0.0, 500.0]);
        assert_eq!(mesh.vertices[7].position, [300.0, 520.0]);
        assert_eq!(mesh.vertices[6].color, colors::TERRAIN_BOTTOM);
        assert_eq!(mesh.vertices[7].color, colors::TERRAIN_TOP);
    }

    #[test]
    fn test_byte_views() {
        let mesh = TerrainMesh::from_terrain(&terrain(), 720.0);
        assert_eq!(mesh.vertex_bytes().len(), 8 * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), 8 * 4);
    }

    #[test]
    fn test_empty_terrain() {
        let mesh = TerrainMesh::from_terrain(&Terrain::default(), 720.0);
        assert!(mesh.vertices.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }
}
