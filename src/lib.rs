//! BLOCKMAP: a tile-based level loader
//!
//! Levels are authored as nested JSON arrays: a list of tiles, each pairing a
//! block identifier with a 2D position. Loading one means:
//! - Strict schema validation of the decoded document (first violation aborts)
//! - Resolving each tile's packed identifier against a parallel block table
//! - Stitching every placed block's sub-parts into one static mesh, shared by
//!   rendering and collision
//!
//! Bad tiles at assembly time are skipped and recorded, never fatal; anything
//! wrong before that fails the whole load and leaves the host's current level
//! in place.
//!
//! ```
//! use blockmap::{load_level, BlockDef, BlockMesh, BlockTable};
//!
//! let table = BlockTable::from_defs(vec![
//!     BlockDef::new((0, 0), BlockMesh::tile("grass", 1.0)),
//! ]);
//! let map = load_level("[[[0,0],[2,5]]]", &table).unwrap();
//! assert_eq!(map.tile_count, 1);
//! assert!(std::sync::Arc::ptr_eq(&map.render_mesh, &map.collision_mesh));
//! ```

pub mod mesh;
pub mod blocks;
pub mod level;

pub use blocks::{pack_id, unpack_id, BlockDef, BlockTable};
pub use level::{load_level, LevelMap, LoadError, SchemaViolation};
pub use mesh::{BlockMesh, Mesh, MeshPart};
