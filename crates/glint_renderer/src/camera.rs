//! Camera for ray generation.

use glint_math::{Mat3, Ray, Vec3};

/// Camera generating primary rays from a position and yaw/pitch/roll
/// orientation.
///
/// `begin_frame` must run once before a frame's rays are generated; it
/// caches the three rotated film corners the per-pixel interpolation works
/// from.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Radians; positive turns the view toward +X
    pub yaw: f32,
    /// Radians; positive tilts the view up
    pub pitch: f32,
    /// Radians
    pub roll: f32,
    /// Field of view in degrees, measured across the film diagonal
    pub fov: f32,
    pub aspect: f32,
    pub frame_width: u32,
    pub frame_height: u32,

    // Cached film corners (set by begin_frame())
    top_left: Vec3,
    top_right: Vec3,
    bottom_left: Vec3,
}

impl Camera {
    /// Create a camera at the origin looking down +Z.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 90.0,
            aspect: 4.0 / 3.0,
            frame_width: 800,
            frame_height: 600,
            top_left: Vec3::ZERO,
            top_right: Vec3::ZERO,
            bottom_left: Vec3::ZERO,
        }
    }

    /// Set the camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the orientation (radians).
    pub fn with_orientation(mut self, yaw: f32, pitch: f32, roll: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    /// Set the field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set the frame resolution; the aspect ratio follows it.
    pub fn with_frame(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self.aspect = width as f32 / height as f32;
        self
    }

    /// Cache the film corners for this frame. Call once before the pixel
    /// loop, and again whenever position or orientation changed.
    pub fn begin_frame(&mut self) {
        let corner = Vec3::new(-self.aspect, 1.0, 0.0);
        let wanted = (self.fov.to_radians() / 2.0).tan();
        let scale = wanted / corner.length();

        let x = -self.aspect * scale;
        let y = scale;

        let rotation = Mat3::from_rotation_y(self.yaw)
            * Mat3::from_rotation_x(-self.pitch)
            * Mat3::from_rotation_z(self.roll);

        self.top_left = self.position + rotation * Vec3::new(x, y, 1.0);
        self.top_right = self.position + rotation * Vec3::new(-x, y, 1.0);
        self.bottom_left = self.position + rotation * Vec3::new(x, -y, 1.0);
    }

    /// Generate the primary ray for a continuous pixel coordinate.
    pub fn screen_ray(&self, x: f32, y: f32) -> Ray {
        let target = self.top_left
            + (self.top_right - self.top_left) * (x / self.frame_width as f32)
            + (self.bottom_left - self.top_left) * (y / self.frame_height as f32);

        Ray::primary(self.position, (target - self.position).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
