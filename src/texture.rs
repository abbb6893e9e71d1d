use std::path::Path;

use crate::colors;
use crate::render::FrameBuffer;

/// Represents a 2D diffuse texture for texture mapping.
///
/// Stored bottom row first, so `v = 0` is the bottom of the image as in the
/// OBJ texture coordinate convention.
#[derive(Debug, Clone)]
pub struct Texture {
    image: FrameBuffer,
}

impl Texture {
    /// Load a texture from an image file (PNG, TGA, JPG, etc.)
    ///
    /// Image files store the top row first; the rows are flipped on load.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let mut image = FrameBuffer::load(path)?;
        image.flip_vertically();
        Ok(Self { image })
    }

    /// Wraps a frame buffer whose row 0 is already the bottom row.
    pub fn from_framebuffer(image: FrameBuffer) -> Self {
        Self { image }
    }

    /// A 1x1 texture of a single colour.
    pub fn solid(color: u32) -> Self {
        let mut image = FrameBuffer::new(1, 1);
        image.set_pixel(0, 0, color);
        Self { image }
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// The texel is `(u * width, v * height)` truncated, clamped to the texture
    /// edges. Empty textures sample as white.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let (width, height) = (self.image.width(), self.image.height());
        if width == 0 || height == 0 {
            return colors::WHITE;
        }
        let x = ((u * width as f32) as i32).clamp(0, width as i32 - 1);
        let y = ((v * height as f32) as i32).clamp(0, height as i32 - 1);
        self.image.get_pixel(x, y).unwrap_or(colors::WHITE)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
