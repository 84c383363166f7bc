use crate::Vec3;

/// A ray in 3D space with origin, direction, and recursion depth.
///
/// Rays are used for raytracing - they represent a line starting at `origin`
/// and traveling in `direction`. The `depth` field counts how many
/// reflection/refraction bounces produced this ray: camera rays start at 0,
/// and every ray a shader spawns carries `depth + 1`.
///
/// `direction` is expected to be unit length for rays entering the scene
/// queries; a node feeds its geometry the inverse-transformed direction
/// without renormalizing, so local-space intersection code must not rely on
/// unit length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub depth: u32,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3, depth: u32) -> Self {
        Self {
            origin,
            direction,
            depth,
        }
    }

    /// Create a primary ray (depth 0).
    #[inline]
    pub fn primary(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0)
    }

    /// Spawn a secondary ray one recursion level deeper than `self`.
    #[inline]
    pub fn spawn(&self, origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, self.depth + 1)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
