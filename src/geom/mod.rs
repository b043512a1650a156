//! Mesh geometry.
//!
//! - [`Triangle`] / [`TriangleMesh`] - faces and decoded meshes
//! - [`read_obj`] / [`open_obj`] - Wavefront OBJ input

mod obj;
mod triangle;

pub use obj::*;
pub use triangle::*;
