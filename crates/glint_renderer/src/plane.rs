//! Finite horizontal plane primitive.

use crate::geometry::{Geometry, IntersectionInfo, HIT_EPSILON};
use glint_math::{Ray, Vec3};

/// A horizontal plane at height `y`, bounded to a square of side `2 * limit`.
pub struct Plane {
    y: f32,
    limit: f32,
}

impl Plane {
    /// Create a plane at y = 0 extending `limit` units along ±X and ±Z.
    pub fn new(limit: f32) -> Self {
        Self { y: 0.0, limit }
    }

    /// Set the plane height.
    pub fn with_height(mut self, y: f32) -> Self {
        self.y = y;
        self
    }
}

impl Geometry for Plane {
    fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo> {
        if ray.direction.y == 0.0 {
            // Parallel to the plane
            return None;
        }

        let t = (self.y - ray.origin.y) / ray.direction.y;
        if t <= HIT_EPSILON {
            return None;
        }

        let point = ray.at(t);
        if point.x.abs() > self.limit || point.z.abs() > self.limit {
            return None;
        }

        // Normal faces the half-space the ray came from
        let normal = if ray.origin.y >= self.y { Vec3::Y } else { -Vec3::Y };

        Some(IntersectionInfo {
            point,
            normal,
            distance: t,
            u: point.x,
            v: point.z,
        })
    }
}
