//! Environment lookup for rays that leave the scene.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::shading::Color;
use crate::texture::{Bitmap, TextureError};

/// Errors that can occur while loading an environment.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("missing cubemap face '{name}' under {dir}")]
    MissingFace { name: &'static str, dir: String },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Background color source, sampled by direction when a ray hits nothing.
pub trait Environment: Send + Sync {
    fn sample(&self, direction: Vec3) -> Color;
}

/// Face order: +X, -X, +Y, -Y, +Z, -Z.
const FACE_NAMES: [&str; 6] = ["posx", "negx", "posy", "negy", "posz", "negz"];
const FACE_EXTENSIONS: [&str; 3] = ["bmp", "png", "jpg"];

/// A six-face cubemap environment.
pub struct CubemapEnvironment {
    faces: [Bitmap; 6],
}

impl CubemapEnvironment {
    /// Build a cubemap from six face bitmaps in `FACE_NAMES` order.
    pub fn from_faces(faces: [Bitmap; 6]) -> Self {
        Self { faces }
    }

    /// Load `posx`/`negx`/`posy`/`negy`/`posz`/`negz` images from a
    /// directory, trying bmp, png and jpg extensions in that order.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EnvironmentError> {
        let dir = dir.as_ref();

        let mut faces = Vec::with_capacity(6);
        for name in FACE_NAMES {
            let path = FACE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{name}.{ext}")))
                .find(|path| path.exists())
                .ok_or_else(|| EnvironmentError::MissingFace {
                    name,
                    dir: dir.display().to_string(),
                })?;
            faces.push(Bitmap::load(path)?);
        }

        log::info!("Loaded cubemap environment from {}", dir.display());

        let faces: [Bitmap; 6] = match faces.try_into() {
            Ok(faces) => faces,
            Err(_) => unreachable!("exactly six faces are loaded above"),
        };
        Ok(Self::from_faces(faces))
    }
}

impl Environment for CubemapEnvironment {
    fn sample(&self, direction: Vec3) -> Color {
        let abs = direction.abs();

        // Pick the face by the dominant axis, then project the remaining
        // two components onto it
        let (face, major, sc, tc) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x > 0.0 {
                (0, abs.x, -direction.z, -direction.y)
            } else {
                (1, abs.x, direction.z, -direction.y)
            }
        } else if abs.y >= abs.z {
            if direction.y > 0.0 {
                (2, abs.y, direction.x, direction.z)
            } else {
                (3, abs.y, direction.x, -direction.z)
            }
        } else if direction.z > 0.0 {
            (4, abs.z, direction.x, -direction.y)
        } else {
            (5, abs.z, -direction.x, -direction.y)
        };

        if major == 0.0 {
            return Color::ZERO;
        }

        let u = 0.5 * (sc / major + 1.0);
        let v = 0.5 * (tc / major + 1.0);
        self.faces[face].sample(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_solid_faces() -> [Bitmap; 6] {
        [
            Bitmap::solid_color(Color::new(1.0, 0.0, 0.0)),
            Bitmap::solid_color(Color::new(0.5, 0.0, 0.0)),
            Bitmap::solid_color(Color::new(0.0, 1.0, 0.0)),
            Bitmap::solid_color(Color::new(0.0, 0.5, 0.0)),
            Bitmap::solid_color(Color::new(0.0, 0.0, 1.0)),
            Bitmap::solid_color(Color::new(0.0, 0.0, 0.5)),
        ]
    }

    #[test]
    fn test_axis_directions_pick_their_face() {
        let env = CubemapEnvironment::from_faces(six_solid_faces());

        assert_eq!(env.sample(Vec3::X), Color::new(1.0, 0.0, 0.0));
        assert_eq!(env.sample(-Vec3::X), Color::new(0.5, 0.0, 0.0));
        assert_eq!(env.sample(Vec3::Y), Color::new(0.0, 1.0, 0.0));
        assert_eq!(env.sample(-Vec3::Y), Color::new(0.0, 0.5, 0.0));
        assert_eq!(env.sample(Vec3::Z), Color::new(0.0, 0.0, 1.0));
        assert_eq!(env.sample(-Vec3::Z), Color::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_dominant_axis_wins() {
        let env = CubemapEnvironment::from_faces(six_solid_faces());

        let direction = Vec3::new(0.9, 0.3, -0.2).normalize();
        assert_eq!(env.sample(direction), Color::new(1.0, 0.0, 0.0));

        let direction = Vec3::new(0.1, -0.8, 0.3).normalize();
        assert_eq!(env.sample(direction), Color::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_missing_directory_errors() {
        let result = CubemapEnvironment::load("/nonexistent/cubemap");
        assert!(matches!(
            result,
            Err(EnvironmentError::MissingFace { name: "posx", .. })
        ));
    }
}
