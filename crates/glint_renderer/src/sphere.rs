//! Sphere primitive for ray tracing.

use crate::geometry::{Geometry, IntersectionInfo, HIT_EPSILON};
use glint_math::{Ray, Vec3};
use std::f32::consts::PI;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // p is a point on the unit sphere centered at origin
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        let u = phi / (2.0 * PI);
        let v = theta / PI;
        (u, v)
    }
}

impl Geometry for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if root <= HIT_EPSILON {
            root = (h + sqrtd) / a;
            if root <= HIT_EPSILON {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        let (u, v) = Self::get_sphere_uv(outward_normal);

        Some(IntersectionInfo {
            point,
            normal: outward_normal,
            distance: root,
            u,
            v,
        })
    }
}
