//! Recursive color evaluation.

use glint_math::{Ray, Vec3};

use crate::scene::Scene;
use crate::shading::Color;

/// Default bounce budget for reflection/refraction chains.
pub const MAX_TRACE_DEPTH: u32 = 4;

/// Default offset applied to secondary-ray origins so a surface does not
/// immediately intersect itself.
pub const DEFAULT_RAY_BIAS: f32 = 1e-4;

/// Evaluates rays against a scene.
///
/// A `Tracer` borrows the scene for the duration of a render pass and is
/// handed to every [`crate::shading::Shader::shade`] call: shaders call
/// [`Tracer::trace`] for reflection/refraction rays and [`Tracer::visible`]
/// for shadow rays. Both paths always return a definite color or answer;
/// "hit nothing" and "out of depth" are ordinary results, not errors.
pub struct Tracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    ray_bias: f32,
}

impl<'a> Tracer<'a> {
    /// Create a tracer with the default depth budget and ray bias.
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_limits(scene, MAX_TRACE_DEPTH, DEFAULT_RAY_BIAS)
    }

    /// Create a tracer with explicit limits.
    pub fn with_limits(scene: &'a Scene, max_depth: u32, ray_bias: f32) -> Self {
        Self {
            scene,
            max_depth,
            ray_bias,
        }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Offset for secondary-ray origins, see [`DEFAULT_RAY_BIAS`].
    pub fn ray_bias(&self) -> f32 {
        self.ray_bias
    }

    /// Compute the color seen along a ray.
    ///
    /// Rays past the depth budget resolve to black; this is the only thing
    /// that terminates a mirror-into-mirror chain. Rays that clear the
    /// scene resolve to the environment, or black without one.
    pub fn trace(&self, ray: &Ray) -> Color {
        if ray.depth > self.max_depth {
            return Color::ZERO;
        }

        match self.scene.find_closest(ray) {
            Some((index, info)) => self.scene.nodes[index].shader.shade(self, ray, &info),
            None => match &self.scene.environment {
                Some(environment) => environment.sample(ray.direction),
                None => Color::ZERO,
            },
        }
    }

    /// Whether the segment between two points is unobstructed.
    pub fn visible(&self, from: Vec3, to: Vec3) -> bool {
        self.scene.is_visible(from, to)
    }
}
