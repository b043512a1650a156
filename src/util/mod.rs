//! Utility types shared across the library:
//! - [`Error`] / [`Result`] / [`ErrorKind`] - Error handling
//! - Math type re-exports from glam and [`BBox3f`]

mod error;
mod math;

pub use error::*;
pub use math::*;
