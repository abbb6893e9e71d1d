//! A small CPU software renderer.
//!
//! Loads a textured OBJ mesh and draws it into an in-memory frame buffer with
//! a fixed pinhole camera, per-face Lambert lighting and a z-buffer, then
//! writes the result as an image. Also ships the dense [`Matrix`] type with a
//! Gauss-Jordan inverse.
//!
//! # Quick Start
//!
//! ```no_run
//! use softrender::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = Mesh::from_obj("obj/african_head.obj")?;
//! let texture = Texture::from_file("obj/african_head_diffuse.tga")?;
//! let mut frame = FrameBuffer::new(800, 800);
//!
//! let session = RenderSession::new(&mesh, &texture, 3.0, DirectionalLight::default());
//! session.render(RenderMode::Textured, &mut frame);
//!
//! frame.flip_vertically();
//! frame.save("output.png")?;
//! # Ok(())
//! # }
//! ```

pub mod colors;
pub mod config;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;

// Re-export commonly needed types at crate root for convenience
pub use config::{ConfigError, RenderConfig};
pub use math::{DomainError, Matrix};
pub use mesh::{LoadError, Mesh};
pub use render::{FrameBuffer, RenderMode, RenderSession, RenderStats};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use softrender::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use crate::config::RenderConfig;

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projector;
    pub use crate::texture::Texture;

    // Math
    pub use crate::math::matrix::Matrix;
    pub use crate::math::vec2::{Vec2, Vec2i};
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{FrameBuffer, RenderMode, RenderSession, RenderStats};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::depth::DepthBuffer;
    pub use crate::render::rasterizer::{fill_triangle, rasterize_triangle, FlatShader, TextureShader};
}
