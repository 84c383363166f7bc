//! Shader trait and the standard surface shaders.
//!
//! Shaders receive the active [`Tracer`] with every call, which is how
//! reflection and refraction recurse into the scene and how shadow rays run
//! occlusion tests. Every secondary ray carries `depth + 1` so the tracer's
//! depth budget can cut the recursion off.

use glint_math::{Ray, Vec3};

use crate::geometry::IntersectionInfo;
use crate::scene::PointLight;
use crate::texture::Texture;
use crate::tracer::Tracer;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Trait for shaders that turn an intersection into a color.
pub trait Shader: Send + Sync {
    /// Compute the color of the surface hit by `ray` at `info`.
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color;
}

/// Diffuse shader.
pub struct Lambert {
    albedo: Box<dyn Texture>,
}

impl Lambert {
    /// Create a Lambert shader with the given albedo texture.
    pub fn new(albedo: impl Texture + 'static) -> Self {
        Self {
            albedo: Box::new(albedo),
        }
    }
}

impl Shader for Lambert {
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color {
        let albedo = self.albedo.sample(info);
        let normal = face_forward(ray.direction, info.normal.normalize());

        let mut result = albedo * tracer.scene().ambient_light;
        for light in &tracer.scene().lights {
            let to_light = (light.position - info.point).normalize();
            let diffuse = normal.dot(to_light).max(0.0);
            if diffuse > 0.0 {
                let contribution = light_contribution(tracer, info.point, normal, light);
                result += albedo * light.color * (diffuse * contribution);
            }
        }
        result
    }
}

/// Diffuse shader with a specular highlight.
pub struct Phong {
    albedo: Box<dyn Texture>,
    pub exponent: f32,
    pub specular_multiplier: f32,
}

impl Phong {
    /// Create a Phong shader.
    ///
    /// - `exponent`: highlight tightness, higher is smaller
    /// - `specular_multiplier`: highlight strength
    pub fn new(albedo: impl Texture + 'static, exponent: f32, specular_multiplier: f32) -> Self {
        Self {
            albedo: Box::new(albedo),
            exponent,
            specular_multiplier,
        }
    }
}

impl Shader for Phong {
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color {
        let albedo = self.albedo.sample(info);
        let normal = face_forward(ray.direction, info.normal.normalize());
        let view = -ray.direction.normalize();

        let mut result = albedo * tracer.scene().ambient_light;
        for light in &tracer.scene().lights {
            let contribution = light_contribution(tracer, info.point, normal, light);
            if contribution <= 0.0 {
                continue;
            }

            let to_light = (light.position - info.point).normalize();
            let diffuse = normal.dot(to_light).max(0.0);
            result += albedo * light.color * (diffuse * contribution);

            let reflected = reflect(-to_light, normal);
            let specular = reflected.dot(view).max(0.0).powf(self.exponent);
            result += light.color * (specular * self.specular_multiplier * contribution);
        }
        result
    }
}

/// Perfect mirror shader.
pub struct Reflection {
    pub multiplier: f32,
}

impl Reflection {
    pub fn new(multiplier: f32) -> Self {
        Self { multiplier }
    }
}

impl Shader for Reflection {
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color {
        let normal = face_forward(ray.direction, info.normal.normalize());
        let reflected = reflect(ray.direction, normal);

        let origin = info.point + normal * tracer.ray_bias();
        let child = ray.spawn(origin, reflected);
        tracer.trace(&child) * self.multiplier
    }
}

/// Transparent shader refracting through the surface.
pub struct Refraction {
    pub ior: f32,
    pub multiplier: Color,
}

impl Refraction {
    /// Create a Refraction shader.
    ///
    /// - `ior`: index of refraction (1.33 = water, 1.5 = glass)
    /// - `multiplier`: per-channel attenuation of the transmitted color
    pub fn new(ior: f32, multiplier: Color) -> Self {
        Self { ior, multiplier }
    }
}

impl Shader for Refraction {
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color {
        let direction = ray.direction.normalize();
        let outward = info.normal.normalize();

        // Entering or leaving flips both the working normal and the ratio
        let (normal, eta) = if direction.dot(outward) < 0.0 {
            (outward, 1.0 / self.ior)
        } else {
            (-outward, self.ior)
        };

        let refracted = match refract(direction, normal, eta) {
            Some(refracted) => refracted,
            None => return Color::ZERO, // total internal reflection
        };

        // Push the origin through the surface so the child ray starts on
        // the far side
        let origin = info.point - normal * tracer.ray_bias();
        let child = ray.spawn(origin, refracted);
        tracer.trace(&child) * self.multiplier
    }
}

/// Composite shader blending an ordered list of layers.
pub struct Layered {
    layers: Vec<(Box<dyn Shader>, Color)>,
}

impl Layered {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer on top of the ones already present. `blend` is the
    /// per-channel weight of this layer against the accumulated result.
    pub fn with_layer(mut self, shader: impl Shader + 'static, blend: Color) -> Self {
        self.layers.push((Box::new(shader), blend));
        self
    }
}

impl Default for Layered {
    fn default() -> Self {
        Self::new()
    }
}

impl Shader for Layered {
    fn shade(&self, tracer: &Tracer, ray: &Ray, info: &IntersectionInfo) -> Color {
        let mut result = Color::ZERO;
        for (shader, blend) in &self.layers {
            let layer_color = shader.shade(tracer, ray, info);
            result = layer_color * *blend + result * (Color::ONE - *blend);
        }
        result
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Light arriving at `point`, zero when the light is occluded.
///
/// The shadow ray starts a bias above the surface so the surface does not
/// occlude itself.
fn light_contribution(tracer: &Tracer, point: Vec3, normal: Vec3, light: &PointLight) -> f32 {
    let origin = point + normal * tracer.ray_bias();
    if !tracer.visible(origin, light.position) {
        return 0.0;
    }

    let distance_sqr = (point - light.position).length_squared();
    light.intensity / distance_sqr
}

/// Flip `normal` to oppose `incident`.
#[inline]
fn face_forward(incident: Vec3, normal: Vec3) -> Vec3 {
    if incident.dot(normal) < 0.0 {
        normal
    } else {
        -normal
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface.
///
/// Returns `None` on total internal reflection.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let k = 1.0 - r_out_perp.length_squared();
    if k < 0.0 {
        return None;
    }
    Some(r_out_perp - k.sqrt() * n)
}
