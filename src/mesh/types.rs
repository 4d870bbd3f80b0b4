//! Core types for block and level geometry

use super::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A single mesh vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self { pos, uv, normal }
    }

    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
            uv: Vec2::default(),
            normal: Vec3::ZERO,
        }
    }

    /// The same vertex moved by `offset` (uv and normal unchanged)
    pub fn translated(&self, offset: Vec3) -> Self {
        Self { pos: self.pos + offset, ..*self }
    }
}

/// A triangle face (indices into a vertex array)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub texture_id: Option<usize>,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2, texture_id: None }
    }

    pub fn with_texture(v0: usize, v1: usize, v2: usize, texture_id: usize) -> Self {
        Self { v0, v1, v2, texture_id: Some(texture_id) }
    }

    /// The same face with every index shifted by `base`.
    /// Used when appending one vertex array onto another.
    pub fn rebased(&self, base: usize) -> Self {
        Self {
            v0: self.v0 + base,
            v1: self.v1 + base,
            v2: self.v2 + base,
            texture_id: self.texture_id,
        }
    }
}

/// One sub-part of a building block: a named piece of geometry,
/// typically one per material region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPart {
    /// Display name (e.g., "floor", "trim", "pillar")
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl MeshPart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_geometry(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { name: name.into(), vertices, faces }
    }

    /// Flat square in the XY plane facing +Z, centered on the origin
    pub fn quad(name: impl Into<String>, size: f32) -> Self {
        let half = size / 2.0;
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let vertices = vec![
            Vertex::new(Vec3::new(-half, -half, 0.0), Vec2::new(0.0, 1.0), normal),
            Vertex::new(Vec3::new( half, -half, 0.0), Vec2::new(1.0, 1.0), normal),
            Vertex::new(Vec3::new( half,  half, 0.0), Vec2::new(1.0, 0.0), normal),
            Vertex::new(Vec3::new(-half,  half, 0.0), Vec2::new(0.0, 0.0), normal),
        ];
        let faces = vec![
            Face::new(0, 3, 2),
            Face::new(0, 2, 1),
        ];
        Self::with_geometry(name, vertices, faces)
    }

    /// Axis-aligned cube centered on the origin
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            // Front face
            Vertex::new(Vec3::new(-half, -half,  half), Vec2::new(0.0, 1.0), Vec3::new(0.0, 0.0, 1.0)),
            Vertex::new(Vec3::new( half, -half,  half), Vec2::new(1.0, 1.0), Vec3::new(0.0, 0.0, 1.0)),
            Vertex::new(Vec3::new( half,  half,  half), Vec2::new(1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(-half,  half,  half), Vec2::new(0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            // Back face
            Vertex::new(Vec3::new( half, -half, -half), Vec2::new(0.0, 1.0), Vec3::new(0.0, 0.0, -1.0)),
            Vertex::new(Vec3::new(-half, -half, -half), Vec2::new(1.0, 1.0), Vec3::new(0.0, 0.0, -1.0)),
            Vertex::new(Vec3::new(-half,  half, -half), Vec2::new(1.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            Vertex::new(Vec3::new( half,  half, -half), Vec2::new(0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            // Top face
            Vertex::new(Vec3::new(-half,  half,  half), Vec2::new(0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            Vertex::new(Vec3::new( half,  half,  half), Vec2::new(1.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            Vertex::new(Vec3::new( half,  half, -half), Vec2::new(1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            Vertex::new(Vec3::new(-half,  half, -half), Vec2::new(0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            // Bottom face
            Vertex::new(Vec3::new(-half, -half, -half), Vec2::new(0.0, 1.0), Vec3::new(0.0, -1.0, 0.0)),
            Vertex::new(Vec3::new( half, -half, -half), Vec2::new(1.0, 1.0), Vec3::new(0.0, -1.0, 0.0)),
            Vertex::new(Vec3::new( half, -half,  half), Vec2::new(1.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
            Vertex::new(Vec3::new(-half, -half,  half), Vec2::new(0.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
            // Right face
            Vertex::new(Vec3::new( half, -half,  half), Vec2::new(0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new( half, -half, -half), Vec2::new(1.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new( half,  half, -half), Vec2::new(1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new( half,  half,  half), Vec2::new(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            // Left face
            Vertex::new(Vec3::new(-half, -half, -half), Vec2::new(0.0, 1.0), Vec3::new(-1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(-half, -half,  half), Vec2::new(1.0, 1.0), Vec3::new(-1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(-half,  half,  half), Vec2::new(1.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
            Vertex::new(Vec3::new(-half,  half, -half), Vec2::new(0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
        ];
        // Two triangles per cube face, CW winding
        let faces = vec![
            Face::new(0, 3, 2), Face::new(0, 2, 1),     // Front
            Face::new(4, 7, 6), Face::new(4, 6, 5),     // Back
            Face::new(8, 11, 10), Face::new(8, 10, 9),  // Top
            Face::new(12, 15, 14), Face::new(12, 14, 13), // Bottom
            Face::new(16, 19, 18), Face::new(16, 18, 17), // Right
            Face::new(20, 23, 22), Face::new(20, 22, 21), // Left
        ];
        Self::with_geometry(name, vertices, faces)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// One reusable building block: a named mesh made of one or more sub-parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMesh {
    pub name: String,
    pub parts: Vec<MeshPart>,
}

impl BlockMesh {
    pub fn new(name: impl Into<String>, parts: Vec<MeshPart>) -> Self {
        Self { name: name.into(), parts }
    }

    /// Single-part cube block (handy starter geometry)
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        let name = name.into();
        let part = MeshPart::cube(name.clone(), size);
        Self { name, parts: vec![part] }
    }

    /// Single-part flat tile block
    pub fn tile(name: impl Into<String>, size: f32) -> Self {
        let name = name.into();
        let part = MeshPart::quad(name.clone(), size);
        Self { name, parts: vec![part] }
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Total vertices across all sub-parts
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.vertices.len()).sum()
    }
}

/// Flat merged level geometry: one vertex array, one face array.
/// This is what the host feeds to its renderer and collision system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_translated() {
        let v = Vertex::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec2::new(0.5, 0.5),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let moved = v.translated(Vec3::new(10.0, -20.0, 0.0));
        assert_eq!(moved.pos, Vec3::new(11.0, -18.0, 3.0));
        assert_eq!(moved.uv, v.uv);
        assert_eq!(moved.normal, v.normal);
    }

    #[test]
    fn test_face_rebased() {
        let face = Face::with_texture(0, 1, 2, 7);
        let shifted = face.rebased(10);
        assert_eq!(shifted.v0, 10);
        assert_eq!(shifted.v1, 11);
        assert_eq!(shifted.v2, 12);
        assert_eq!(shifted.texture_id, Some(7));
    }

    #[test]
    fn test_quad_geometry() {
        let part = MeshPart::quad("floor", 2.0);
        assert_eq!(part.vertex_count(), 4);
        assert_eq!(part.face_count(), 2);
        // All vertices sit in the Z=0 plane
        assert!(part.vertices.iter().all(|v| v.pos.z == 0.0));
    }

    #[test]
    fn test_cube_block() {
        let block = BlockMesh::cube("crate", 1.0);
        assert_eq!(block.part_count(), 1);
        assert_eq!(block.vertex_count(), 24);
        assert_eq!(block.parts[0].face_count(), 12);
        // Face indices stay inside the vertex array
        let part = &block.parts[0];
        assert!(part.faces.iter().all(|f| {
            f.v0 < part.vertices.len() && f.v1 < part.vertices.len() && f.v2 < part.vertices.len()
        }));
    }
}
