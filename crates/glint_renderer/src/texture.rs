//! Textures for shader albedo lookup.
//!
//! `Bitmap` is the shared pixel store (linear RGBA float, row-major); it
//! backs both image textures and the environment cubemap faces.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::geometry::IntersectionInfo;
use crate::shading::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Trait for textures sampled at an intersection's UV coordinates.
pub trait Texture: Send + Sync {
    fn sample(&self, info: &IntersectionInfo) -> Color;
}

impl Texture for Box<dyn Texture> {
    fn sample(&self, info: &IntersectionInfo) -> Color {
        (**self).sample(info)
    }
}

/// A loaded image with pixel data.
///
/// Stores pixels in linear RGBA float format, row-major order, 0-1 range.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Bitmap {
    /// Create a bitmap from raw pixel data. `pixels` must hold exactly
    /// `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Self {
        assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a solid color bitmap (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z, 1.0]],
        }
    }

    /// Decode an image file into a bitmap.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba32f();
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();

        log::info!("Loaded bitmap {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Sample the bitmap at UV coordinates (bilinear filtering).
    ///
    /// Coordinates wrap around outside the [0, 1] range; v grows upward.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let p00 = self.get_pixel(x0, y0);
        let p10 = self.get_pixel(x1, y0);
        let p01 = self.get_pixel(x0, y1);
        let p11 = self.get_pixel(x1, y1);

        let top = Vec3::new(
            p00[0] * (1.0 - fx) + p10[0] * fx,
            p00[1] * (1.0 - fx) + p10[1] * fx,
            p00[2] * (1.0 - fx) + p10[2] * fx,
        );
        let bottom = Vec3::new(
            p01[0] * (1.0 - fx) + p11[0] * fx,
            p01[1] * (1.0 - fx) + p11[1] * fx,
            p01[2] * (1.0 - fx) + p11[2] * fx,
        );

        top * (1.0 - fy) + bottom * fy
    }
}

/// A single flat color.
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn sample(&self, _info: &IntersectionInfo) -> Color {
        self.color
    }
}

/// Procedural checkerboard over the UV plane.
pub struct CheckerTexture {
    color1: Color,
    color2: Color,
    pub scaling: f32,
}

impl CheckerTexture {
    pub fn new(color1: Color, color2: Color) -> Self {
        Self {
            color1,
            color2,
            scaling: 1.0,
        }
    }

    /// Scale applied to UV before the lattice lookup; a scaling of 0.2
    /// makes squares five UV units wide.
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;
        self
    }
}

impl Texture for CheckerTexture {
    fn sample(&self, info: &IntersectionInfo) -> Color {
        let x = (info.u * self.scaling).floor() as i64;
        let y = (info.v * self.scaling).floor() as i64;

        if (x + y).rem_euclid(2) == 0 {
            self.color1
        } else {
            self.color2
        }
    }
}

/// An image-backed texture.
pub struct BitmapTexture {
    bitmap: Bitmap,
    pub scaling: f32,
}

impl BitmapTexture {
    pub fn new(bitmap: Bitmap, scaling: f32) -> Self {
        Self { bitmap, scaling }
    }

    /// Load the image at `path`; UV is multiplied by `scaling` before the
    /// (wrapping) lookup.
    pub fn load(path: impl AsRef<Path>, scaling: f32) -> Result<Self, TextureError> {
        Ok(Self {
            bitmap: Bitmap::load(path)?,
            scaling,
        })
    }
}

impl Texture for BitmapTexture {
    fn sample(&self, info: &IntersectionInfo) -> Color {
        self.bitmap.sample(info.u * self.scaling, info.v * self.scaling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_at(u: f32, v: f32) -> IntersectionInfo {
        IntersectionInfo {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 1.0,
            u,
            v,
        }
    }

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::new(Color::new(0.2, 0.4, 0.8));
        assert_eq!(tex.sample(&info_at(0.0, 0.0)), Color::new(0.2, 0.4, 0.8));
        assert_eq!(tex.sample(&info_at(123.0, -7.5)), Color::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_checker_alternates() {
        let tex = CheckerTexture::new(Color::ONE, Color::ZERO);

        assert_eq!(tex.sample(&info_at(0.5, 0.5)), Color::ONE);
        assert_eq!(tex.sample(&info_at(1.5, 0.5)), Color::ZERO);
        assert_eq!(tex.sample(&info_at(1.5, 1.5)), Color::ONE);
    }

    #[test]
    fn test_checker_negative_coordinates() {
        let tex = CheckerTexture::new(Color::ONE, Color::ZERO);

        // floor(-0.5) = -1: one step into the neighboring square
        assert_eq!(tex.sample(&info_at(-0.5, 0.5)), Color::ZERO);
        assert_eq!(tex.sample(&info_at(-0.5, -0.5)), Color::ONE);
    }

    #[test]
    fn test_checker_scaling() {
        let tex = CheckerTexture::new(Color::ONE, Color::ZERO).with_scaling(0.2);

        // Squares are 5 UV units wide
        assert_eq!(tex.sample(&info_at(2.0, 0.0)), Color::ONE);
        assert_eq!(tex.sample(&info_at(7.0, 0.0)), Color::ZERO);
    }

    #[test]
    fn test_bitmap_solid_sample() {
        let bitmap = Bitmap::solid_color(Color::new(0.1, 0.2, 0.3));
        let c = bitmap.sample(0.7, 0.3);
        assert!((c - Color::new(0.1, 0.2, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_bitmap_bilinear_midpoint() {
        let bitmap = Bitmap::new(
            2,
            1,
            vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]],
        );

        // Halfway between the black and white texel
        let c = bitmap.sample(0.5, 0.0);
        assert!((c - Color::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_bitmap_texture_scaling_wraps() {
        let bitmap = Bitmap::solid_color(Color::new(0.9, 0.9, 0.9));
        let tex = BitmapTexture::new(bitmap, 1.0 / 100.0);

        let c = tex.sample(&info_at(250.0, -30.0));
        assert!((c - Color::new(0.9, 0.9, 0.9)).length() < 1e-6);
    }
}
