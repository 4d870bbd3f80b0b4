//! Final mesh combination
//!
//! Collapses a staged set of placed sub-parts into one flat mesh with a
//! single vertex array and a single face array.

use super::math::Vec3;
use super::types::{BlockMesh, Mesh};

/// One staged sub-part: which block, which of its parts, and where it goes.
/// Placement is a pure translation; blocks are never rotated or scaled.
#[derive(Debug, Clone, Copy)]
pub struct PlacedPart<'a> {
    pub block: &'a BlockMesh,
    pub part: usize,
    pub offset: Vec3,
}

/// Merge every staged sub-part into a single mesh.
///
/// Vertices are translated by their entry's offset and face indices are
/// rebased onto the combined vertex array. Sub-part boundaries collapse;
/// per-face texture ids are the only material information that survives.
/// The result keeps the source coordinate origin (no recentring), which is
/// what static level geometry wants.
pub fn combine(placed: &[PlacedPart]) -> Mesh {
    let vertex_total: usize = placed
        .iter()
        .map(|p| p.block.parts[p.part].vertices.len())
        .sum();
    let face_total: usize = placed
        .iter()
        .map(|p| p.block.parts[p.part].faces.len())
        .sum();

    let mut mesh = Mesh {
        vertices: Vec::with_capacity(vertex_total),
        faces: Vec::with_capacity(face_total),
    };

    for placement in placed {
        let part = &placement.block.parts[placement.part];
        let base = mesh.vertices.len();
        for vertex in &part.vertices {
            mesh.vertices.push(vertex.translated(placement.offset));
        }
        for face in &part.faces {
            mesh.faces.push(face.rebased(base));
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Face, MeshPart, Vertex};

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(&[]), Mesh::new());

        // A part with no geometry contributes nothing either
        let empty = BlockMesh::new("empty", vec![MeshPart::new("nothing")]);
        let mesh = combine(&[PlacedPart { block: &empty, part: 0, offset: Vec3::ZERO }]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_combine_translates_vertices() {
        let block = BlockMesh::tile("floor", 2.0);
        let placed = [PlacedPart {
            block: &block,
            part: 0,
            offset: Vec3::new(3.0, -4.0, 0.0),
        }];
        let mesh = combine(&placed);
        assert_eq!(mesh.vertex_count(), 4);
        for (merged, original) in mesh.vertices.iter().zip(&block.parts[0].vertices) {
            assert_eq!(merged.pos, original.pos + Vec3::new(3.0, -4.0, 0.0));
            assert_eq!(merged.uv, original.uv);
        }
    }

    #[test]
    fn test_combine_rebases_faces() {
        let block = BlockMesh::tile("floor", 1.0);
        let placed = [
            PlacedPart { block: &block, part: 0, offset: Vec3::ZERO },
            PlacedPart { block: &block, part: 0, offset: Vec3::new(1.0, 0.0, 0.0) },
        ];
        let mesh = combine(&placed);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 4);
        // Faces of the second placement index into the second vertex range
        for face in &mesh.faces[2..] {
            assert!(face.v0 >= 4 && face.v1 >= 4 && face.v2 >= 4);
            assert!(face.v0 < 8 && face.v1 < 8 && face.v2 < 8);
        }
    }

    #[test]
    fn test_combine_keeps_texture_ids() {
        let part = MeshPart::with_geometry(
            "tri",
            vec![
                Vertex::from_pos(0.0, 0.0, 0.0),
                Vertex::from_pos(1.0, 0.0, 0.0),
                Vertex::from_pos(0.0, 1.0, 0.0),
            ],
            vec![Face::with_texture(0, 1, 2, 7)],
        );
        let block = BlockMesh::new("textured", vec![part]);
        let mesh = combine(&[PlacedPart { block: &block, part: 0, offset: Vec3::ZERO }]);
        assert_eq!(mesh.faces[0].texture_id, Some(7));
    }
}
