//! Frame sampling: one color per pixel, written into the framebuffer.

use crate::camera::Camera;
use crate::framebuffer::Framebuffer;
use crate::scene::Scene;
use crate::shading::Color;
use crate::tracer::{Tracer, DEFAULT_RAY_BIAS, MAX_TRACE_DEPTH};

/// Render configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Five sub-pixel samples per pixel instead of one
    pub antialiasing: bool,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Offset for secondary-ray origins (shadow, reflection, refraction)
    pub ray_bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            antialiasing: false,
            max_depth: MAX_TRACE_DEPTH,
            ray_bias: DEFAULT_RAY_BIAS,
        }
    }
}

/// Fixed sub-pixel sample offsets.
///
/// The same offsets every pixel, every frame: repeated renders of an
/// unchanged scene are bit-identical.
pub const SAMPLE_OFFSETS: [(f32, f32); 5] =
    [(0.0, 0.0), (0.6, 0.0), (0.3, 0.3), (0.0, 0.6), (0.6, 0.6)];

/// Compute the color of one pixel.
///
/// Without antialiasing this is a single sample at the first offset, stored
/// as-is; with antialiasing the five offsets are averaged.
pub fn render_pixel(tracer: &Tracer, camera: &Camera, x: u32, y: u32, antialiasing: bool) -> Color {
    let (dx, dy) = SAMPLE_OFFSETS[0];
    let first = tracer.trace(&camera.screen_ray(x as f32 + dx, y as f32 + dy));
    if !antialiasing {
        return first;
    }

    let mut sum = first;
    for &(dx, dy) in &SAMPLE_OFFSETS[1..] {
        sum += tracer.trace(&camera.screen_ray(x as f32 + dx, y as f32 + dy));
    }
    sum / SAMPLE_OFFSETS.len() as f32
}

/// Render the scene into the framebuffer.
///
/// Runs the camera's per-frame setup once, then walks the pixels in
/// row-major order. Every pixel is independent of every other; the order is
/// not observable in the output.
///
/// Panics if the framebuffer resolution does not match the camera's.
pub fn render(scene: &Scene, camera: &mut Camera, config: &RenderConfig, framebuffer: &mut Framebuffer) {
    assert_eq!(
        (camera.frame_width, camera.frame_height),
        (framebuffer.width(), framebuffer.height()),
        "camera and framebuffer resolutions must match"
    );

    camera.begin_frame();
    let tracer = Tracer::with_limits(scene, config.max_depth, config.ray_bias);

    for y in 0..framebuffer.height() {
        for x in 0..framebuffer.width() {
            let color = render_pixel(&tracer, camera, x, y, config.antialiasing);
            framebuffer.set(x, y, color);
        }
    }
}
