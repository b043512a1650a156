//! # rayprobe
//!
//! Sanity checks for recorded ray traces and scene meshes, run before
//! restructurable-BVH (RBVH) analysis.
//!
//! A trace data root holds, per scene, a binary ray dump of every query a
//! renderer issued and the scene's triangles as Wavefront OBJ. This crate
//! loads both and reduces them to counts that can be checked by eye.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math types
//! - [`rays`] - Shadow and cast queries, [`RaySet`]
//! - [`raydump`] - Binary ray dump reader and writer
//! - [`geom`] - Triangles and the OBJ reader
//! - [`probe`] - Path convention and the load-and-aggregate operations
//!
//! ## Example
//!
//! ```no_run
//! use rayprobe::probe::{analyze_shadow_connectivity, load_triangle_mesh};
//!
//! let connected = analyze_shadow_connectivity("traces/")?;
//! let triangles = load_triangle_mesh("traces/")?;
//! println!("{} connected shadow rays, {} triangles", connected, triangles.len());
//! # Ok::<(), rayprobe::Error>(())
//! ```

pub mod util;
pub mod rays;
pub mod raydump;
pub mod geom;
pub mod probe;

// Re-export commonly used types
pub use util::{Error, ErrorKind, Result};
pub use rays::{RaySet, ShadowQuery, ShadowStats};
pub use geom::{Triangle, TriangleMesh};
pub use probe::{analyze_shadow_connectivity, load_triangle_mesh, TraceLayout};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BBox3f, Error, ErrorKind, Result, Vec3};
    pub use crate::rays::*;
    pub use crate::raydump::{read_ray_dump, DumpLayout, RayDumpReader, RayDumpWriter};
    pub use crate::geom::*;
    pub use crate::probe::*;
}
