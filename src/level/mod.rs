//! Level loading pipeline
//!
//! Decode, validate, assemble, in one synchronous pass:
//! - `schema` checks decoded level text against the tile schema
//! - `assemble` stitches block geometry into the merged level mesh
//! - `loader` ties both together behind `load_level`

mod schema;
mod assemble;
mod loader;

pub use schema::{validate_level, SchemaViolation, ShapeError, Slot, TokenKind};
pub use assemble::{build_map, LevelMap, SkipReason, SkippedTile};
pub use loader::{load_level, LoadError};
