//! Scene node: one placed object.

use crate::geometry::{Geometry, IntersectionInfo};
use crate::shading::Shader;
use glint_math::{Ray, Transform};

/// A geometry placed in the world, with the shader that colors it.
///
/// The transform maps the node's local space to world space. It must not
/// change while a frame is being rendered; moving a node between frames is
/// fine.
pub struct Node {
    pub geometry: Box<dyn Geometry>,
    pub shader: Box<dyn Shader>,
    pub transform: Transform,
}

impl Node {
    /// Create a node with an identity transform.
    pub fn new(geometry: impl Geometry + 'static, shader: impl Shader + 'static) -> Self {
        Self {
            geometry: Box::new(geometry),
            shader: Box::new(shader),
            transform: Transform::identity(),
        }
    }

    /// Set the node's local-to-world transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Test a world-space ray against this node.
    ///
    /// The ray is mapped into local space (the direction without
    /// renormalization), handed to the geometry, and the hit mapped back.
    /// The distance is recomputed between world-space points: a scaled
    /// transform makes the local parameter useless for comparing hits
    /// across nodes.
    pub fn intersect(&self, ray: &Ray) -> Option<IntersectionInfo> {
        let local_ray = Ray::new(
            self.transform.untransform_point(ray.origin),
            self.transform.untransform_direction(ray.direction),
            ray.depth,
        );

        let mut info = self.geometry.intersect(&local_ray)?;

        info.point = self.transform.transform_point(info.point);
        info.normal = self.transform.transform_direction(info.normal);
        info.distance = ray.origin.distance(info.point);

        Some(info)
    }
}
