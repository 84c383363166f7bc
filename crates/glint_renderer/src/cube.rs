//! Axis-aligned cube primitive.
//!
//! Local space only; oriented cubes come from the owning node's transform.

use crate::geometry::{Geometry, IntersectionInfo, HIT_EPSILON};
use glint_math::{Ray, Vec3};

/// An axis-aligned cube given by its center and half side length.
pub struct Cube {
    center: Vec3,
    half_side: f32,
}

impl Cube {
    /// Create a new cube.
    pub fn new(center: Vec3, half_side: f32) -> Self {
        Self {
            center,
            half_side: half_side.max(0.0),
        }
    }
}

impl Geometry for Cube {
    fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo> {
        let min = self.center - Vec3::splat(self.half_side);
        let max = self.center + Vec3::splat(self.half_side);

        // Slab intersection, tracking which axis bounds the interval
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir == 0.0 {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }

            let mut t0 = (min[axis] - origin) / dir;
            let mut t1 = (max[axis] - origin) / dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
            }
            if t_enter > t_exit {
                return None;
            }
        }

        // Entry face if it is in front of the ray, otherwise the ray starts
        // inside and hits the exit face
        let (t, axis, leaving) = if t_enter > HIT_EPSILON {
            (t_enter, enter_axis, false)
        } else if t_exit > HIT_EPSILON && t_exit.is_finite() {
            (t_exit, exit_axis, true)
        } else {
            return None;
        };

        let point = ray.at(t);
        let dir_sign = ray.direction[axis].signum();
        let mut normal = Vec3::ZERO;
        normal[axis] = if leaving { dir_sign } else { -dir_sign };

        let local = point - self.center;
        let (u, v) = match axis {
            0 => (local.y, local.z),
            1 => (local.x, local.z),
            _ => (local.x, local.y),
        };

        Some(IntersectionInfo {
            point,
            normal,
            distance: t,
            u,
            v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_hit_front_face() {
        let cube = Cube::new(Vec3::ZERO, 1.0);
        let ray = Ray::primary(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let info = cube.intersect(&ray).expect("ray should hit the cube");
        assert!((info.distance - 4.0).abs() < 0.001);
        assert_eq!(info.normal, Vec3::new(0.0, 0.0, -1.0));
        assert!((info.point.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_cube_hit_top_face() {
        let cube = Cube::new(Vec3::ZERO, 1.0);
        let ray = Ray::primary(Vec3::new(0.5, 5.0, -0.25), Vec3::new(0.0, -1.0, 0.0));

        let info = cube.intersect(&ray).expect("ray should hit the cube");
        assert_eq!(info.normal, Vec3::Y);
        assert!((info.u - 0.5).abs() < 0.001);
        assert!((info.v - (-0.25)).abs() < 0.001);
    }

    #[test]
    fn test_cube_hit_from_inside() {
        let cube = Cube::new(Vec3::ZERO, 1.0);
        let ray = Ray::primary(Vec3::ZERO, Vec3::X);

        let info = cube.intersect(&ray).expect("ray should exit the cube");
        assert!((info.distance - 1.0).abs() < 0.001);
        assert_eq!(info.normal, Vec3::X);
    }

    #[test]
    fn test_cube_miss() {
        let cube = Cube::new(Vec3::ZERO, 1.0);
        let ray = Ray::primary(Vec3::new(0.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(cube.intersect(&ray).is_none());
    }

    #[test]
    fn test_cube_behind_origin() {
        let cube = Cube::new(Vec3::new(0.0, 0.0, -4.0), 1.0);
        let ray = Ray::primary(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(cube.intersect(&ray).is_none());
    }
}
