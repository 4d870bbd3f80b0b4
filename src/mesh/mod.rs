//! Mesh data model
//!
//! The geometry the loader works with:
//! - `Vec3`/`Vec2` vector math
//! - `Vertex`/`Face` primitives with per-face texture slots
//! - `MeshPart` sub-parts grouped into reusable `BlockMesh` building blocks
//! - `Mesh`, the flat merged output, plus `combine` to produce it

mod math;
mod types;
mod combine;

pub use math::{Vec2, Vec3};
pub use types::{BlockMesh, Face, Mesh, MeshPart, Vertex};
pub use combine::{combine, PlacedPart};
