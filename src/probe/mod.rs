//! Load-and-aggregate checks over a trace data root.
//!
//! Each scene keeps its recordings in a fixed location under the root:
//!
//! ```text
//! <root>/scientist/raydump.ray     ray dump
//! <root>/scientist/triangles.obj   scene mesh
//! ```
//!
//! [`TraceLayout`] names those locations; the free functions use the
//! default layout. Both pipelines are independent and open their file
//! only for the duration of the call.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::geom::{open_obj, Triangle, TriangleMesh};
use crate::raydump::open_ray_dump;
use crate::rays::{RaySet, ShadowStats};
use crate::util::Result;

/// Scene directory used by the recorded traces.
pub const DEFAULT_SCENE_DIR: &str = "scientist";

/// Ray dump file name inside the scene directory.
pub const RAY_DUMP_FILE: &str = "raydump.ray";

/// Mesh file name inside the scene directory.
pub const MESH_FILE: &str = "triangles.obj";

/// Where a scene's files live relative to a trace data root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceLayout {
    pub scene_dir: String,
    pub ray_dump_file: String,
    pub mesh_file: String,
}

impl Default for TraceLayout {
    fn default() -> Self {
        Self {
            scene_dir: DEFAULT_SCENE_DIR.to_string(),
            ray_dump_file: RAY_DUMP_FILE.to_string(),
            mesh_file: MESH_FILE.to_string(),
        }
    }
}

impl TraceLayout {
    /// Default file names under another scene directory.
    pub fn for_scene(scene_dir: impl Into<String>) -> Self {
        Self { scene_dir: scene_dir.into(), ..Self::default() }
    }

    pub fn ray_dump_path(&self, base: impl AsRef<Path>) -> PathBuf {
        base.as_ref().join(&self.scene_dir).join(&self.ray_dump_file)
    }

    pub fn mesh_path(&self, base: impl AsRef<Path>) -> PathBuf {
        base.as_ref().join(&self.scene_dir).join(&self.mesh_file)
    }

    /// Load the scene's ray dump in full.
    #[tracing::instrument(skip_all, fields(base = %base.as_ref().display()))]
    pub fn load_ray_set(&self, base: impl AsRef<Path>) -> Result<RaySet> {
        let path = self.ray_dump_path(base);
        debug!(path = %path.display(), "opening ray dump");
        let set = open_ray_dump(&path)?;
        debug!(
            shadows = set.shadow_queries().len(),
            casts = set.num_casts(),
            "ray dump loaded"
        );
        Ok(set)
    }

    /// Number of shadow queries in the scene's dump that reached their light.
    pub fn analyze_shadow_connectivity(&self, base: impl AsRef<Path>) -> Result<usize> {
        Ok(self.shadow_stats(base)?.connected)
    }

    pub fn shadow_stats(&self, base: impl AsRef<Path>) -> Result<ShadowStats> {
        let set = self.load_ray_set(base)?;
        let stats = set.shadow_stats();
        info!(connected = stats.connected, total = stats.total, "shadow connectivity");
        Ok(stats)
    }

    /// Load the scene's mesh, keeping the declared vertex count.
    #[tracing::instrument(skip_all, fields(base = %base.as_ref().display()))]
    pub fn load_mesh(&self, base: impl AsRef<Path>) -> Result<TriangleMesh> {
        let path = self.mesh_path(base);
        debug!(path = %path.display(), "opening mesh");
        let mesh = open_obj(&path)?;
        info!(triangles = mesh.len(), "mesh loaded");
        Ok(mesh)
    }

    /// Load the scene's triangles in file order.
    pub fn load_triangle_mesh(&self, base: impl AsRef<Path>) -> Result<Vec<Triangle>> {
        self.load_mesh(base).map(Vec::from)
    }
}

/// Load `<base>/scientist/raydump.ray`.
pub fn load_ray_set(base: impl AsRef<Path>) -> Result<RaySet> {
    TraceLayout::default().load_ray_set(base)
}

/// Count connected shadow queries in `<base>/scientist/raydump.ray`.
pub fn analyze_shadow_connectivity(base: impl AsRef<Path>) -> Result<usize> {
    TraceLayout::default().analyze_shadow_connectivity(base)
}

/// Load the triangles of `<base>/scientist/triangles.obj`.
pub fn load_triangle_mesh(base: impl AsRef<Path>) -> Result<Vec<Triangle>> {
    TraceLayout::default().load_triangle_mesh(base)
}

/// Number of shadow queries in `set` whose ray reached the light.
#[inline]
pub fn count_connected(set: &RaySet) -> usize {
    set.count_connected()
}
