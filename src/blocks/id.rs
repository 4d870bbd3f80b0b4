//! Packed block identifiers
//!
//! Level data names each block by a pair of axis values; block tables key
//! their entries by the packed form.

/// Pack a 2D identifier pair into the single key block tables use.
///
/// Layout: low 16 bits are `x`, high 16 bits are `y`. Inputs outside
/// `[0, 65535]` are masked rather than rejected, so distinct out-of-range
/// pairs can alias to the same key. The mask is kept for compatibility with
/// existing level data; new identifier ranges should stay inside 16 bits
/// per axis.
pub fn pack_id(x: i32, y: i32) -> u32 {
    let x = x as u32 & 0xFFFF;
    let y = y as u32 & 0xFFFF;
    x | (y << 16)
}

/// Split a packed key back into its masked (x, y) halves
pub fn unpack_id(key: u32) -> (u16, u16) {
    ((key & 0xFFFF) as u16, (key >> 16) as u16)
}
