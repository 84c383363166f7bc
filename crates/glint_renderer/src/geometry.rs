//! Geometry trait and intersection record for ray-object intersection.

use glint_math::{Ray, Vec3};

/// Minimum distance along a ray for an intersection to count.
///
/// Keeps a surface from reporting the ray's own origin as a hit.
pub const HIT_EPSILON: f32 = 1e-4;

/// Record of a ray-geometry intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionInfo {
    /// Point of intersection
    pub point: Vec3,
    /// Geometric outward surface normal at the intersection. Shaders flip it
    /// against the incoming ray themselves; after a node maps it to world
    /// space it is not necessarily unit length.
    pub normal: Vec3,
    /// Distance along the ray from its origin. Scene nodes overwrite this
    /// with the world-space distance after mapping the hit out of local
    /// space.
    pub distance: f32,
    /// Texture coordinates
    pub u: f32,
    pub v: f32,
}

/// Trait for shapes that can be intersected by rays in their local space.
///
/// Implementations must accept non-unit ray directions: a scaled node
/// transform hands its geometry the inverse-transformed direction as-is.
pub trait Geometry: Send + Sync {
    /// Test the ray against this shape.
    ///
    /// Returns the nearest intersection with distance greater than
    /// [`HIT_EPSILON`], or `None`.
    fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo>;
}
