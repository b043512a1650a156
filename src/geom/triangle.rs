//! Triangles and triangle meshes.

use bytemuck::{Pod, Zeroable};

use crate::util::{BBox3f, Vec3};

/// One mesh face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Triangle {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl Triangle {
    #[inline]
    pub const fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p1, p2, p3 }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn bounds(&self) -> BBox3f {
        BBox3f::from_points(self.vertices())
    }

    /// Unnormalized face normal, `(p1 - p3) x (p2 - p3)`.
    pub fn normal(&self) -> Vec3 {
        (self.p1 - self.p3).cross(self.p2 - self.p3)
    }

    /// Distance along `direction` (in units of its length) at which the
    /// ray from `origin` meets the triangle.
    ///
    /// The ray passes through the triangle when the three side faces of
    /// the tetrahedron spanned by `origin` and the triangle all see
    /// `direction` on the same side.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let e1 = self.p1 - origin;
        let e2 = self.p2 - origin;
        let e3 = self.p3 - origin;

        let v1 = e1.cross(e2).dot(direction);
        let v2 = e2.cross(e3).dot(direction);
        let v3 = e3.cross(e1).dot(direction);
        if v1 * v2 < 0.0 || v2 * v3 < 0.0 || v3 * v1 < 0.0 {
            return None;
        }

        let norm = self.normal();
        let t = e1.dot(norm) / direction.dot(norm);
        (t.is_finite() && t >= 0.0).then_some(t)
    }

    /// True if the segment `origin .. origin + difference` crosses the
    /// triangle before its end point.
    pub fn intersects_segment(&self, origin: Vec3, difference: Vec3) -> bool {
        matches!(self.intersect_ray(origin, difference), Some(t) if t < 1.0)
    }
}

/// Triangles decoded from one mesh file, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
    /// Number of vertex records the file declared.
    pub num_vertices: usize,
}

impl TriangleMesh {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Every triangle vertex as one flat slice, three per triangle.
    pub fn positions(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn bounds(&self) -> BBox3f {
        BBox3f::from_points(self.positions().iter().copied())
    }

    /// First triangle hit by the segment, as `(triangle index, t)`.
    pub fn first_hit(&self, origin: Vec3, difference: Vec3) -> Option<(usize, f32)> {
        self.triangles
            .iter()
            .enumerate()
            .filter_map(|(i, tri)| tri.intersect_ray(origin, difference).map(|t| (i, t)))
            .filter(|&(_, t)| t < 1.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            triangles: self.len(),
            vertices: self.num_vertices,
            bounds: self.bounds(),
        }
    }
}

impl From<TriangleMesh> for Vec<Triangle> {
    fn from(mesh: TriangleMesh) -> Self {
        mesh.triangles
    }
}

/// Summary of a loaded mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshStats {
    pub triangles: usize,
    pub vertices: usize,
    pub bounds: BBox3f,
}
