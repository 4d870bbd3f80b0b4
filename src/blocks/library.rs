//! Block library storage
//!
//! Block definitions live on disk as RON files, one definition per file,
//! optionally brotli-compressed.
//! - Reading: auto-detects format by checking for a valid RON start
//! - Writing: always compresses

use std::fs;
use std::io::Cursor;
use std::path::Path;

use super::table::{BlockDef, BlockTable};

/// Error type for block library I/O
#[derive(Debug)]
pub enum LibraryError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for LibraryError {
    fn from(e: std::io::Error) -> Self {
        LibraryError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LibraryError {
    fn from(e: ron::error::SpannedError) -> Self {
        LibraryError::ParseError(e)
    }
}

impl From<ron::Error> for LibraryError {
    fn from(e: ron::Error) -> Self {
        LibraryError::SerializeError(e)
    }
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::IoError(e) => write!(f, "IO error: {}", e),
            LibraryError::ParseError(e) => write!(f, "Parse error: {}", e),
            LibraryError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LibraryError {}

/// Load one block definition from a RON file (plain or brotli-compressed)
pub fn load_block_file<P: AsRef<Path>>(path: P) -> Result<BlockDef, LibraryError> {
    let bytes = fs::read(path)?;

    // Detect format: RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .unwrap_or(false);

    let text_bytes = if is_plain_ron {
        bytes
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed).map_err(|e| {
            LibraryError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e),
            ))
        })?;
        decompressed
    };

    let contents = String::from_utf8(text_bytes).map_err(|e| {
        LibraryError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid UTF-8: {}", e),
        ))
    })?;

    Ok(ron::from_str(&contents)?)
}

/// Save a block definition to a compressed RON file (brotli)
pub fn save_block_file<P: AsRef<Path>>(def: &BlockDef, path: P) -> Result<(), LibraryError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(def, config)?;

    // Compress with brotli (quality 6, window 22)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(
        &mut Cursor::new(ron_string.as_bytes()),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| {
        LibraryError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("brotli compression failed: {}", e),
        ))
    })?;

    fs::write(path, compressed)?;
    Ok(())
}

/// Scan a directory for `.ron` block files and assemble a table from them.
///
/// Unreadable files are logged and skipped rather than failing the scan.
/// Files are visited in name order so the table layout is stable across runs.
pub fn load_block_dir<P: AsRef<Path>>(dir: P) -> Result<BlockTable, LibraryError> {
    let dir = dir.as_ref();
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "ron").unwrap_or(false))
        .collect();
    paths.sort();

    let mut defs = Vec::new();
    for path in &paths {
        match load_block_file(path) {
            Ok(def) => defs.push(def),
            Err(e) => log::warn!("ignoring block file {:?}: {}", path, e),
        }
    }

    log::info!("loaded {} blocks from {:?}", defs.len(), dir);
    Ok(BlockTable::from_defs(defs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::pack_id;
    use crate::mesh::BlockMesh;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rock.ron");
        let def = BlockDef::new((1, 2), BlockMesh::cube("rock", 1.0));
        save_block_file(&def, &path).unwrap();
        let loaded = load_block_file(&path).unwrap();
        assert_eq!(loaded, def);
    }

    #[test]
    fn test_load_plain_ron() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grass.ron");
        let def = BlockDef::new((0, 0), BlockMesh::tile("grass", 1.0));
        std::fs::write(&path, ron::to_string(&def).unwrap()).unwrap();
        let loaded = load_block_file(&path).unwrap();
        assert_eq!(loaded, def);
    }

    #[test]
    fn test_load_block_dir_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        let grass = BlockDef::new((0, 0), BlockMesh::tile("grass", 1.0));
        let rock = BlockDef::new((1, 0), BlockMesh::cube("rock", 1.0));
        save_block_file(&grass, dir.path().join("a_grass.ron")).unwrap();
        save_block_file(&rock, dir.path().join("b_rock.ron")).unwrap();
        std::fs::write(dir.path().join("c_broken.ron"), "(this is not a block").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a block file").unwrap();

        let table = load_block_dir(dir.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(pack_id(0, 0)), Some(0));
        assert_eq!(table.resolve(pack_id(1, 0)), Some(1));
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load_block_dir(dir.path().join("nope")).is_err());
    }
}
