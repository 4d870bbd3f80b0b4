//! Level schema validation
//!
//! Level data is a list of tiles; each tile is `[identifier, position]` and
//! each of those is a two-number list. The walk below checks a decoded
//! document against that shape, depth-first, and reports the first element
//! that does not match.

use serde_json::Value;

use crate::blocks::{pack_id, unpack_id, BlockTable};

/// Coarse classification of a decoded token, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    List,
    Number,
    String,
    Bool,
    Null,
    Object,
}

impl TokenKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => TokenKind::List,
            Value::Number(_) => TokenKind::Number,
            Value::String(_) => TokenKind::String,
            Value::Bool(_) => TokenKind::Bool,
            Value::Null => TokenKind::Null,
            Value::Object(_) => TokenKind::Object,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::List => "list",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Bool => "bool",
            TokenKind::Null => "null",
            TokenKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Which half of a tile entry a violation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Identifier,
    Position,
}

impl Slot {
    /// Index of this slot within a tile entry
    pub fn index(self) -> usize {
        match self {
            Slot::Identifier => 0,
            Slot::Position => 1,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Identifier => write!(f, "identifier"),
            Slot::Position => write!(f, "position"),
        }
    }
}

/// How a list-shaped element failed its check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Not a list at all
    NotAList(TokenKind),
    /// A list, but of the wrong length
    WrongLen(usize),
}

/// A structural problem found while checking decoded level data.
/// Any single one of these aborts a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The document root is not a list
    WrongRootType { found: TokenKind },
    /// A tile entry is not a two-element `[identifier, position]` list
    WrongTileShape { tile: usize, found: ShapeError },
    /// An identifier or position slot is not a two-number list
    WrongSlotShape { tile: usize, slot: Slot, found: ShapeError },
    /// A value inside a slot is not numeric
    NonNumericLeaf {
        tile: usize,
        slot: Slot,
        index: usize,
        found: TokenKind,
    },
    /// The tile's packed identifier has no entry in the block table
    UnknownIdentifier { tile: usize, id: u32 },
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaViolation::WrongRootType { found } => {
                write!(f, "level root must be a list, got {}", found)
            }
            SchemaViolation::WrongTileShape { tile, found } => match found {
                ShapeError::NotAList(kind) => {
                    write!(f, "tile [{}] must be a list, got {}", tile, kind)
                }
                ShapeError::WrongLen(len) => {
                    write!(f, "tile [{}] must have exactly 2 entries, got {}", tile, len)
                }
            },
            SchemaViolation::WrongSlotShape { tile, slot, found } => match found {
                ShapeError::NotAList(kind) => {
                    write!(f, "{} of tile [{}] must be a list, got {}", slot, tile, kind)
                }
                ShapeError::WrongLen(len) => write!(
                    f,
                    "{} of tile [{}] must have exactly 2 numbers, got {} entries",
                    slot, tile, len
                ),
            },
            SchemaViolation::NonNumericLeaf { tile, slot, index, found } => write!(
                f,
                "value [{}][{}][{}] must be a number, got {}",
                tile,
                slot.index(),
                index,
                found
            ),
            SchemaViolation::UnknownIdentifier { tile, id } => {
                let (x, y) = unpack_id(*id);
                write!(
                    f,
                    "tile [{}] names unknown block id {:#010x} (x={}, y={})",
                    tile, id, x, y
                )
            }
        }
    }
}

/// Check a decoded level document against the tile schema.
///
/// Walks depth-first (tile order, then slot order, then leaf order) and stops
/// at the first violation, before any geometry work. Every tile's identifier
/// must resolve in `table`.
pub fn validate_level(root: &Value, table: &BlockTable) -> Result<(), SchemaViolation> {
    let tiles = match root {
        Value::Array(tiles) => tiles,
        other => {
            return Err(SchemaViolation::WrongRootType {
                found: TokenKind::of(other),
            })
        }
    };

    for (tile, entry) in tiles.iter().enumerate() {
        validate_tile(tile, entry, table)?;
    }

    Ok(())
}

/// Check one `[identifier, position]` tile entry
fn validate_tile(tile: usize, entry: &Value, table: &BlockTable) -> Result<(), SchemaViolation> {
    let pair = match entry {
        Value::Array(pair) => pair,
        other => {
            return Err(SchemaViolation::WrongTileShape {
                tile,
                found: ShapeError::NotAList(TokenKind::of(other)),
            })
        }
    };
    if pair.len() != 2 {
        return Err(SchemaViolation::WrongTileShape {
            tile,
            found: ShapeError::WrongLen(pair.len()),
        });
    }

    let (id_x, id_y) = validate_slot(tile, Slot::Identifier, &pair[0])?;
    validate_slot(tile, Slot::Position, &pair[1])?;

    // Identifiers arrive as doubles; whole values are expected, so floor
    let key = pack_id(id_x.floor() as i32, id_y.floor() as i32);
    if table.resolve(key).is_none() {
        return Err(SchemaViolation::UnknownIdentifier { tile, id: key });
    }

    Ok(())
}

/// Check that a slot is a two-number list; returns both values
fn validate_slot(tile: usize, slot: Slot, value: &Value) -> Result<(f64, f64), SchemaViolation> {
    let pair = match value {
        Value::Array(pair) => pair,
        other => {
            return Err(SchemaViolation::WrongSlotShape {
                tile,
                slot,
                found: ShapeError::NotAList(TokenKind::of(other)),
            })
        }
    };
    if pair.len() != 2 {
        return Err(SchemaViolation::WrongSlotShape {
            tile,
            slot,
            found: ShapeError::WrongLen(pair.len()),
        });
    }

    let a = validate_leaf(tile, slot, 0, &pair[0])?;
    let b = validate_leaf(tile, slot, 1, &pair[1])?;
    Ok((a, b))
}

fn validate_leaf(
    tile: usize,
    slot: Slot,
    index: usize,
    value: &Value,
) -> Result<f64, SchemaViolation> {
    match value.as_f64() {
        Some(number) => Ok(number),
        None => Err(SchemaViolation::NonNumericLeaf {
            tile,
            slot,
            index,
            found: TokenKind::of(value),
        }),
    }
}
