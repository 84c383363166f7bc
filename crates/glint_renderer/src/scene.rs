//! Scene container and the linear-scan ray queries.

use glint_math::{Ray, Vec3};

use crate::environment::Environment;
use crate::geometry::IntersectionInfo;
use crate::node::Node;
use crate::shading::Color;

/// A point light.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    /// Radiant power; falls off with the squared distance.
    pub intensity: f32,
}

/// Everything the tracer reads: nodes, lights, ambient light and an optional
/// environment.
///
/// A scene is built up front and stays immutable while a frame renders; the
/// render entry points only ever take `&Scene`. Mutating it between frames
/// (moving a node, swapping a shader) is fine.
pub struct Scene {
    pub nodes: Vec<Node>,
    pub lights: Vec<PointLight>,
    pub ambient_light: Color,
    pub environment: Option<Box<dyn Environment>>,
}

impl Scene {
    /// Create an empty scene: no nodes, no lights, black ambient, no
    /// environment.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lights: Vec::new(),
            ambient_light: Color::ZERO,
            environment: None,
        }
    }

    /// Add a node and return its index, usable as a handle into `nodes`.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Find the nearest node intersection along the ray.
    ///
    /// Returns the winning node's index together with the hit. The
    /// comparison is strict, so among hits at exactly equal distance the
    /// node added first wins; scene construction order is therefore part of
    /// the rendered output.
    pub fn find_closest(&self, ray: &Ray) -> Option<(usize, IntersectionInfo)> {
        let mut best: Option<(usize, IntersectionInfo)> = None;
        let mut best_distance = f32::INFINITY;

        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(info) = node.intersect(ray) {
                if info.distance < best_distance {
                    best_distance = info.distance;
                    best = Some((index, info));
                }
            }
        }

        best
    }

    /// Whether the straight segment from `from` to `to` is unobstructed.
    ///
    /// Only hits strictly closer than `to` block the segment; a surface
    /// exactly at the endpoint does not. This scan short-circuits on the
    /// first blocker instead of looking for the nearest one, so it stays
    /// separate from [`Scene::find_closest`].
    pub fn is_visible(&self, from: Vec3, to: Vec3) -> bool {
        let max_distance = from.distance(to);
        if max_distance == 0.0 {
            return true;
        }
        let ray = Ray::primary(from, (to - from).normalize());

        for node in &self.nodes {
            if let Some(info) = node.intersect(&ray) {
                if info.distance < max_distance {
                    return false;
                }
            }
        }

        true
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::Shader;
    use crate::sphere::Sphere;
    use crate::tracer::Tracer;

    struct NullShader;

    impl Shader for NullShader {
        fn shade(&self, _tracer: &Tracer, _ray: &Ray, _info: &IntersectionInfo) -> Color {
            Color::ZERO
        }
    }

    fn sphere_node(center: Vec3, radius: f32) -> Node {
        Node::new(Sphere::new(center, radius), NullShader)
    }

    #[test]
    fn test_find_closest_picks_nearer_sphere() {
        let mut scene = Scene::new();
        let far = scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 10.0), 1.0));
        let near = scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 5.0), 1.0));

        let ray = Ray::primary(Vec3::ZERO, Vec3::Z);
        let (index, info) = scene.find_closest(&ray).expect("both spheres lie ahead");

        assert_eq!(index, near);
        assert_ne!(index, far);
        assert!((info.distance - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_find_closest_overlapping_spheres() {
        let mut scene = Scene::new();
        scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 6.0), 2.0));
        let winner = scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 5.0), 1.5));

        let ray = Ray::primary(Vec3::ZERO, Vec3::Z);
        let (index, info) = scene.find_closest(&ray).expect("spheres overlap the ray");

        assert_eq!(index, winner);
        assert!((info.distance - 3.5).abs() < 0.001);
    }

    #[test]
    fn test_find_closest_tie_prefers_first_node() {
        // Two identical spheres: equal distances, insertion order decides
        let mut scene = Scene::new();
        let first = scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 5.0), 1.0));
        scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 5.0), 1.0));

        let ray = Ray::primary(Vec3::ZERO, Vec3::Z);
        let (index, _) = scene.find_closest(&ray).expect("spheres lie ahead");

        assert_eq!(index, first);
    }

    #[test]
    fn test_find_closest_miss() {
        let mut scene = Scene::new();
        scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 5.0), 1.0));

        let ray = Ray::primary(Vec3::ZERO, -Vec3::Z);
        assert!(scene.find_closest(&ray).is_none());
    }

    #[test]
    fn test_visible_with_blocker() {
        let mut scene = Scene::new();
        scene.add_node(sphere_node(Vec3::new(0.0, 0.0, 4.0), 1.0));

        assert!(!scene.is_visible(Vec3::ZERO, Vec3::new(0.0, 0.0, 8.0)));
        assert!(scene.is_visible(Vec3::ZERO, Vec3::new(0.0, 8.0, 0.0)));
    }

    #[test]
    fn test_visible_endpoint_on_surface() {
        // The occluder's surface sits exactly at the endpoint: distances are
        // equal, the strict comparison keeps the endpoint visible
        let mut scene = Scene::new();
        scene.add_node(sphere_node(Vec3::ZERO, 1.0));

        let from = Vec3::new(0.0, 0.0, -5.0);
        let surface = Vec3::new(0.0, 0.0, -1.0);
        assert!(scene.is_visible(from, surface));

        // One step past the surface the sphere blocks
        assert!(!scene.is_visible(from, Vec3::new(0.0, 0.0, -0.5)));
    }

    #[test]
    fn test_visible_degenerate_segment() {
        let mut scene = Scene::new();
        scene.add_node(sphere_node(Vec3::ZERO, 1.0));

        let p = Vec3::new(0.0, 0.0, -3.0);
        assert!(scene.is_visible(p, p));
    }
}
