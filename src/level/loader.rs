//! Level loading
//!
//! The one-shot entry point hosts call: decode JSON text, check it against
//! the tile schema, assemble the merged level mesh.

use serde_json::Value;

use super::assemble::{build_map, LevelMap};
use super::schema::{validate_level, SchemaViolation};
use crate::blocks::BlockTable;

/// Error type for level loading
#[derive(Debug)]
pub enum LoadError {
    /// The block table's id and geometry arrays differ in length
    ConfigMismatch { ids: usize, blocks: usize },
    /// The level text is not valid JSON
    Decode(serde_json::Error),
    /// The decoded level does not match the tile schema
    Schema(SchemaViolation),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Decode(e)
    }
}

impl From<SchemaViolation> for LoadError {
    fn from(violation: SchemaViolation) -> Self {
        LoadError::Schema(violation)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::ConfigMismatch { ids, blocks } => {
                write!(f, "block table mismatch: {} ids for {} blocks", ids, blocks)
            }
            LoadError::Decode(e) => write!(f, "decode error: {}", e),
            LoadError::Schema(violation) => write!(f, "schema error: {}", violation),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load a level from JSON text against a block table.
///
/// One-shot synchronous pipeline: the table length check, the decode, the
/// schema walk, then assembly. A fatal error returns before any geometry
/// work, so whatever the host currently displays stays untouched; assembly
/// itself never fails, it only skips bad tiles.
pub fn load_level(json: &str, table: &BlockTable) -> Result<LevelMap, LoadError> {
    if table.ids.len() != table.blocks.len() {
        log::error!(
            "building blocks and ids differ: {} blocks for {} ids",
            table.blocks.len(),
            table.ids.len()
        );
        return Err(LoadError::ConfigMismatch {
            ids: table.ids.len(),
            blocks: table.blocks.len(),
        });
    }

    let root: Value = match serde_json::from_str(json) {
        Ok(root) => root,
        Err(e) => {
            log::error!("level text is not valid JSON: {}", e);
            return Err(LoadError::Decode(e));
        }
    };

    if let Err(violation) = validate_level(&root, table) {
        // Non-numeric leaves and unknown ids log quietly; every violation
        // still stops the load
        match violation {
            SchemaViolation::NonNumericLeaf { .. } | SchemaViolation::UnknownIdentifier { .. } => {
                log::info!("{}", violation)
            }
            _ => log::error!("{}", violation),
        }
        log::error!("level data failed the schema check");
        return Err(violation.into());
    }

    Ok(build_map(&root, table))
}
