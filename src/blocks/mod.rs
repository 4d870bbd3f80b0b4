//! Building blocks and their lookup table
//!
//! - Packed identifier codec joining level data to table entries
//! - `BlockTable`, the parallel id/geometry arrays a level resolves against
//! - RON-backed library storage for block definitions

mod id;
mod table;
mod library;

pub use id::{pack_id, unpack_id};
pub use table::{BlockDef, BlockTable};
pub use library::{load_block_dir, load_block_file, save_block_file, LibraryError};
