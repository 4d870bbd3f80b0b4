//! Block tables
//!
//! The parallel-array pair a level is resolved against: packed identifier
//! keys and the block geometry they name, in matching order.

use serde::{Deserialize, Serialize};

use super::id::pack_id;
use crate::mesh::BlockMesh;

/// One stored block definition: the identifier pair level data uses to
/// reference the block, plus its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDef {
    /// Identifier pair as written in level data; packed when a table is built
    pub id: (i32, i32),
    pub block: BlockMesh,
}

impl BlockDef {
    pub fn new(id: (i32, i32), block: BlockMesh) -> Self {
        Self { id, block }
    }

    /// The packed table key for this definition
    pub fn key(&self) -> u32 {
        pack_id(self.id.0, self.id.1)
    }
}

/// The lookup table a level is loaded against: `ids[i]` names `blocks[i]`.
///
/// The two arrays must stay the same length; the load pipeline refuses a
/// mismatched table before touching any level data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTable {
    pub ids: Vec<u32>,
    pub blocks: Vec<BlockMesh>,
}

impl BlockTable {
    pub fn new(ids: Vec<u32>, blocks: Vec<BlockMesh>) -> Self {
        Self { ids, blocks }
    }

    /// Build a table from block definitions.
    /// The parallel arrays line up by construction.
    pub fn from_defs(defs: Vec<BlockDef>) -> Self {
        let mut ids = Vec::with_capacity(defs.len());
        let mut blocks = Vec::with_capacity(defs.len());
        for def in defs {
            ids.push(def.key());
            blocks.push(def.block);
        }
        Self { ids, blocks }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Find the block index for a packed key.
    ///
    /// Linear scan; the first matching entry wins, so a table with duplicate
    /// ids always resolves to the earliest one. Duplicates are not rejected.
    pub fn resolve(&self, key: u32) -> Option<usize> {
        self.ids.iter().position(|&id| id == key)
    }

    /// Worst-case sub-part count across all blocks (0 for an empty table).
    /// Bounds the merge buffer for a load.
    pub fn max_parts(&self) -> usize {
        self.blocks.iter().map(|b| b.parts.len()).max().unwrap_or(0)
    }
}
