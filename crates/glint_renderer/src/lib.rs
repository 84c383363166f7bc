//! glint renderer - CPU Whitted ray tracing
//!
//! A recursive ray tracer over a flat list of scene nodes: every node pairs
//! a local-space geometry with a shader and a world transform. Rays scan the
//! node list for the nearest hit, shaders spawn depth-counted secondary rays
//! for reflection, refraction and shadows, and a deterministic five-offset
//! pattern supersamples each pixel when antialiasing is on.

mod camera;
mod cube;
mod environment;
mod framebuffer;
mod geometry;
mod node;
mod plane;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod texture;
mod tracer;

pub use camera::Camera;
pub use cube::Cube;
pub use environment::{CubemapEnvironment, Environment, EnvironmentError};
pub use framebuffer::{color_to_rgba, Framebuffer, FramebufferError};
pub use geometry::{Geometry, IntersectionInfo, HIT_EPSILON};
pub use node::Node;
pub use plane::Plane;
pub use renderer::{render, render_pixel, RenderConfig, SAMPLE_OFFSETS};
pub use scene::{PointLight, Scene};
pub use shading::{Color, Lambert, Layered, Phong, Reflection, Refraction, Shader};
pub use sphere::Sphere;
pub use texture::{Bitmap, BitmapTexture, CheckerTexture, SolidColor, Texture, TextureError};
pub use tracer::{Tracer, DEFAULT_RAY_BIAS, MAX_TRACE_DEPTH};

/// Re-export common math types from glint_math
pub use glint_math::{Mat3, Mat4, Ray, Transform, Vec3};
