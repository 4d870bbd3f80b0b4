//! Level assembly
//!
//! Turns a validated level document plus a block table into the merged level
//! geometry. This is the only stage with a partial-failure path: a tile that
//! cannot be placed is skipped and recorded, never fatal.

use std::sync::Arc;

use serde_json::Value;

use crate::blocks::{pack_id, BlockTable};
use crate::mesh::{combine, Mesh, PlacedPart, Vec3};

/// Why a tile was left out of the merged level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The resolved block index fell outside the geometry array
    BadBlockIndex(usize),
    /// The merge buffer was already full when the tile started
    BufferFull,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::BadBlockIndex(index) => write!(f, "block index {} out of range", index),
            SkipReason::BufferFull => write!(f, "merge buffer full"),
        }
    }
}

/// Record of one tile the assembler had to leave out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedTile {
    pub tile: usize,
    pub reason: SkipReason,
}

/// A fully assembled level.
///
/// Render and collision geometry are handles to the same merged mesh; the
/// host installs them into its own slots.
#[derive(Debug, Clone)]
pub struct LevelMap {
    pub render_mesh: Arc<Mesh>,
    pub collision_mesh: Arc<Mesh>,
    pub tile_count: usize,
    pub skipped: Vec<SkippedTile>,
}

impl LevelMap {
    /// Tiles that made it into the merged geometry
    pub fn placed_count(&self) -> usize {
        self.tile_count - self.skipped.len()
    }
}

/// Stitch every tile's block geometry into one static level mesh.
///
/// `level` must already have passed `validate_level` against the same table;
/// the walk here re-derives each tile's identifier and position assuming the
/// shape is good, and panics if it is not.
pub fn build_map(level: &Value, table: &BlockTable) -> LevelMap {
    let tiles = match level.as_array() {
        Some(tiles) => tiles,
        None => panic!("level data must pass the schema check before assembly"),
    };

    let capacity = table.max_parts() * tiles.len();
    log::info!("assembling {} tiles ({} buffer slots)", tiles.len(), capacity);

    let mut buffer: Vec<PlacedPart> = Vec::with_capacity(capacity);
    let mut skipped = Vec::new();

    for (tile, entry) in tiles.iter().enumerate() {
        let (key, offset) = tile_fields(entry);
        // A miss here means the level was validated against a different table
        let object_index = match table.resolve(key) {
            Some(index) => index,
            None => panic!(
                "tile {} id {:#010x} does not resolve; level was not validated against this table",
                tile, key
            ),
        };
        match stage_block(&mut buffer, capacity, table, object_index, offset) {
            Ok(parts) => log::debug!(
                "tile {}: {} parts of '{}' at ({}, {}, {})",
                tile,
                parts,
                table.blocks[object_index].name,
                offset.x,
                offset.y,
                offset.z
            ),
            Err(reason) => {
                log::warn!("tile {} skipped: {}", tile, reason);
                skipped.push(SkippedTile { tile, reason });
            }
        }
    }

    let mesh = Arc::new(combine(&buffer));
    log::info!(
        "level mesh ready: {} vertices, {} faces, {} of {} tiles placed",
        mesh.vertex_count(),
        mesh.face_count(),
        tiles.len() - skipped.len(),
        tiles.len()
    );

    LevelMap {
        render_mesh: Arc::clone(&mesh),
        collision_mesh: mesh,
        tile_count: tiles.len(),
        skipped,
    }
}

/// Stage every sub-part of one block into the merge buffer.
///
/// Returns how many parts were staged, or why the tile was rejected. Room is
/// checked once, before the first part: a block that starts with space left
/// can still be cut short when the buffer fills mid-way, and nothing is ever
/// written past `capacity`.
fn stage_block<'a>(
    buffer: &mut Vec<PlacedPart<'a>>,
    capacity: usize,
    table: &'a BlockTable,
    object_index: usize,
    offset: Vec3,
) -> Result<usize, SkipReason> {
    if object_index >= table.blocks.len() {
        return Err(SkipReason::BadBlockIndex(object_index));
    }
    if buffer.len() >= capacity {
        return Err(SkipReason::BufferFull);
    }

    let block = &table.blocks[object_index];
    let mut staged = 0;
    for part in 0..block.parts.len() {
        if buffer.len() == capacity {
            break;
        }
        buffer.push(PlacedPart { block, part, offset });
        staged += 1;
    }
    Ok(staged)
}

/// Re-derive the packed id and placement offset from one tile entry.
///
/// The level's vertical axis maps to -Y in mesh space; the inversion matches
/// the coordinate convention existing level data was authored in.
fn tile_fields(entry: &Value) -> (u32, Vec3) {
    let number = |slot: usize, index: usize| -> f64 {
        entry[slot][index]
            .as_f64()
            .unwrap_or_else(|| panic!("malformed tile entry reached assembly: {}", entry))
    };

    let key = pack_id(number(0, 0).floor() as i32, number(0, 1).floor() as i32);
    let offset = Vec3::new(number(1, 0) as f32, -(number(1, 1) as f32), 0.0);
    (key, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockDef;
    use crate::mesh::{BlockMesh, MeshPart};

    fn table() -> BlockTable {
        BlockTable::from_defs(vec![
            BlockDef::new((3, 0), BlockMesh::tile("grass", 1.0)),
            BlockDef::new((5, 5), BlockMesh::cube("rock", 1.0)),
        ])
    }

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_single_tile_placement() {
        let map = build_map(&parse("[[[3,0],[3,4]]]"), &table());
        assert_eq!(map.tile_count, 1);
        assert!(map.skipped.is_empty());

        // One quad sub-part, translated to (3, -4, 0)
        let source = MeshPart::quad("grass", 1.0);
        assert_eq!(map.render_mesh.vertex_count(), 4);
        for (merged, original) in map.render_mesh.vertices.iter().zip(&source.vertices) {
            assert_eq!(merged.pos, original.pos + Vec3::new(3.0, -4.0, 0.0));
        }
    }

    #[test]
    fn test_fractional_position_inverts_y() {
        let map = build_map(&parse("[[[3,0],[1.5,-2.25]]]"), &table());
        let source = MeshPart::quad("grass", 1.0);
        for (merged, original) in map.render_mesh.vertices.iter().zip(&source.vertices) {
            assert_eq!(merged.pos, original.pos + Vec3::new(1.5, 2.25, 0.0));
        }
    }

    #[test]
    fn test_render_and_collision_share_geometry() {
        let map = build_map(&parse("[[[5,5],[0,0]]]"), &table());
        assert!(Arc::ptr_eq(&map.render_mesh, &map.collision_mesh));
    }

    #[test]
    fn test_empty_level() {
        let map = build_map(&parse("[]"), &table());
        assert_eq!(map.tile_count, 0);
        assert!(map.render_mesh.is_empty());
        assert!(map.skipped.is_empty());
    }

    #[test]
    fn test_out_of_range_index_skipped() {
        // An id entry with no matching geometry resolves past the mesh array
        let mut table = table();
        table.ids.push(pack_id(9, 9));

        let map = build_map(&parse("[[[9,9],[0,0]],[[3,0],[1,0]]]"), &table);
        assert_eq!(
            map.skipped,
            vec![SkippedTile { tile: 0, reason: SkipReason::BadBlockIndex(2) }]
        );
        assert_eq!(map.placed_count(), 1);
        // Only the grass tile's quad made it into the merge, offset by (1, 0, 0)
        assert_eq!(map.render_mesh.vertex_count(), 4);
        assert_eq!(map.render_mesh.vertices[0].pos, Vec3::new(0.5, -0.5, 0.0));
    }

    #[test]
    fn test_zero_part_block_fills_nothing() {
        let table = BlockTable::from_defs(vec![BlockDef::new(
            (3, 0),
            BlockMesh::new("ghost", vec![]),
        )]);
        let map = build_map(&parse("[[[3,0],[0,0]]]"), &table);
        assert!(map.render_mesh.is_empty());
        assert_eq!(
            map.skipped,
            vec![SkippedTile { tile: 0, reason: SkipReason::BufferFull }]
        );
    }

    #[test]
    fn test_capacity_cuts_block_mid_way() {
        let duo = BlockMesh::new(
            "duo",
            vec![MeshPart::quad("a", 1.0), MeshPart::quad("b", 1.0)],
        );
        let table = BlockTable::from_defs(vec![BlockDef::new((0, 0), duo)]);

        let mut buffer = Vec::with_capacity(3);
        // First block fits whole, second starts with room but is cut short
        assert_eq!(stage_block(&mut buffer, 3, &table, 0, Vec3::ZERO), Ok(2));
        assert_eq!(stage_block(&mut buffer, 3, &table, 0, Vec3::ZERO), Ok(1));
        assert_eq!(buffer.len(), 3);
        // Now the buffer is full before the tile starts
        assert_eq!(
            stage_block(&mut buffer, 3, &table, 0, Vec3::ZERO),
            Err(SkipReason::BufferFull)
        );
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_rejects_unvalidated_root() {
        build_map(&parse("{\"not\":\"a level\"}"), &table());
    }

    #[test]
    fn test_cube_block_geometry() {
        let map = build_map(&parse("[[[5,5],[2,1]]]"), &table());
        assert_eq!(map.render_mesh.vertex_count(), 24);
        assert_eq!(map.render_mesh.face_count(), 12);
    }
}
