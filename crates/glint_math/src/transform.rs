// Local <-> world transform for scene nodes.
//
// Wraps a glam::Mat4 together with its inverse so that rays can be mapped
// into a node's local space and hit data mapped back out without inverting
// the matrix per query. Note: glam::Mat4 already provides transform_point3()
// and transform_vector3() (w=0, translation ignored).

use crate::{Mat4, Vec3};

/// An invertible local-to-world transform built by composing
/// translate/rotate/scale steps. Each step applies after the ones already
/// recorded, so `t.rotate(..); t.translate(..)` rotates first, then
/// translates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
}

impl Transform {
    /// The identity transform (local space == world space).
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
        }
    }

    /// Append a translation by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.matrix = Mat4::from_translation(offset) * self.matrix;
        self.inverse = self.inverse * Mat4::from_translation(-offset);
    }

    /// Append a rotation given as yaw (around Y), pitch (around X) and roll
    /// (around Z), all in radians. Roll is applied first, then pitch, then
    /// yaw.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, roll: f32) {
        let rotation =
            Mat4::from_rotation_y(yaw) * Mat4::from_rotation_x(pitch) * Mat4::from_rotation_z(roll);
        let rotation_inv = Mat4::from_rotation_z(-roll)
            * Mat4::from_rotation_x(-pitch)
            * Mat4::from_rotation_y(-yaw);
        self.matrix = rotation * self.matrix;
        self.inverse = self.inverse * rotation_inv;
    }

    /// Append a (possibly non-uniform) scale. All components must be
    /// non-zero, otherwise the transform stops being invertible.
    pub fn scale(&mut self, factor: Vec3) {
        self.matrix = Mat4::from_scale(factor) * self.matrix;
        self.inverse = self.inverse * Mat4::from_scale(Vec3::ONE / factor);
    }

    /// Map a local-space point to world space.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Map a world-space point to local space.
    #[inline]
    pub fn untransform_point(&self, point: Vec3) -> Vec3 {
        self.inverse.transform_point3(point)
    }

    /// Map a local-space direction to world space (w=0, translation does not
    /// apply). The result is not renormalized.
    #[inline]
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.matrix.transform_vector3(direction)
    }

    /// Map a world-space direction to local space. The result is not
    /// renormalized.
    #[inline]
    pub fn untransform_direction(&self, direction: Vec3) -> Vec3 {
        self.inverse.transform_vector3(direction)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_point_to_itself() {
        let t = Transform::identity();
        let point = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(t.transform_point(point), point);
        assert_eq!(t.untransform_point(point), point);
    }

    #[test]
    fn test_translation_point() {
        let mut t = Transform::identity();
        t.translate(Vec3::new(10.0, 20.0, 30.0));

        let point = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(t.transform_point(point), Vec3::new(11.0, 22.0, 33.0));
        assert_eq!(t.untransform_point(Vec3::new(11.0, 22.0, 33.0)), point);
    }

    #[test]
    fn test_translation_does_not_affect_directions() {
        let mut t = Transform::identity();
        t.translate(Vec3::new(10.0, 20.0, 30.0));

        let direction = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(t.transform_direction(direction), direction);
        assert_eq!(t.untransform_direction(direction), direction);
    }

    #[test]
    fn test_rotation_around_y() {
        use std::f32::consts::PI;

        let mut t = Transform::identity();
        t.rotate(PI / 2.0, 0.0, 0.0);

        // +X rotates to -Z under a quarter turn around Y
        let rotated = t.transform_direction(Vec3::X);
        assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let back = t.untransform_direction(rotated);
        assert!((back - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_rotate_then_translate_order() {
        use std::f32::consts::PI;

        let mut t = Transform::identity();
        t.rotate(PI / 2.0, 0.0, 0.0);
        t.translate(Vec3::new(5.0, 0.0, 0.0));

        // Rotation applies first: (1,0,0) -> (0,0,-1), then translation
        let p = t.transform_point(Vec3::X);
        assert!((p - Vec3::new(5.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_non_uniform_scale() {
        let mut t = Transform::identity();
        t.scale(Vec3::new(2.0, 1.0, 0.5));

        assert_eq!(
            t.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.0, 1.0, 0.5)
        );
        assert_eq!(
            t.untransform_point(Vec3::new(2.0, 1.0, 0.5)),
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_composed_round_trip() {
        use std::f32::consts::PI;

        let mut t = Transform::identity();
        t.scale(Vec3::new(3.0, 1.0, 2.0));
        t.rotate(PI / 4.0, PI / 6.0, 0.0);
        t.translate(Vec3::new(-7.0, 12.0, 4.5));

        let point = Vec3::new(5.0, 3.0, 2.0);
        let back = t.untransform_point(t.transform_point(point));
        assert!((back - point).length() < 1e-4);

        let direction = Vec3::new(0.3, -0.9, 0.6);
        let back = t.untransform_direction(t.transform_direction(direction));
        assert!((back - direction).length() < 1e-4);
    }
}
