//! Individual ray query records.

use crate::util::Vec3;

/// Depth recorded for queries whose dump format does not carry one.
pub const DEPTH_UNKNOWN: i32 = -1;

/// A camera or bounce ray that hit geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastHitQuery {
    pub depth: i32,
    pub origin: Vec3,
    /// Vector from the origin to the hit point.
    pub difference: Vec3,
}

impl CastHitQuery {
    /// Position where the ray hit.
    #[inline]
    pub fn hit_point(&self) -> Vec3 {
        self.origin + self.difference
    }
}

/// A camera or bounce ray that escaped the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastMissQuery {
    pub depth: i32,
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// One shadow-ray test performed during rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowQuery {
    pub depth: i32,
    pub origin: Vec3,
    /// Segment from the shaded point to the light sample.
    pub difference: Vec3,
    /// True if the segment reached the light without occlusion.
    pub connected: bool,
}

impl ShadowQuery {
    pub fn new(origin: Vec3, difference: Vec3, connected: bool) -> Self {
        Self { depth: DEPTH_UNKNOWN, origin, difference, connected }
    }

    /// Position of the light sample.
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.origin + self.difference
    }

    #[inline]
    pub fn is_occluded(&self) -> bool {
        !self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_query_target() {
        let q = ShadowQuery::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), false);
        assert_eq!(q.target(), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(q.depth, DEPTH_UNKNOWN);
        assert!(q.is_occluded());
    }

    #[test]
    fn test_hit_point() {
        let q = CastHitQuery { depth: 0, origin: Vec3::ONE, difference: Vec3::X };
        assert_eq!(q.hit_point(), Vec3::new(2.0, 1.0, 1.0));
    }
}
