//! Owning colour buffer with 2D pixel access.
//!
//! The frame buffer is the pixel sink the renderer draws into, and doubles as
//! the image type behind [`Texture`](crate::texture::Texture). Pixels are
//! ARGB8888 (`0xAARRGGBB`), stored row by row with row 0 first.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::colors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a frame buffer cleared to [`colors::BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Copies an RGBA image into a new frame buffer.
    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let color_buffer = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::rgba(r, g, b, a)
            })
            .collect();
        Self {
            color_buffer,
            width,
            height,
        }
    }

    /// Loads any image format the `image` crate understands.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        Ok(Self::from_image(&img))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.offset(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.offset(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Mirrors the image top to bottom, moving the origin between the top-left
    /// and bottom-left corner.
    pub fn flip_vertically(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.color_buffer.split_at_mut((height - 1 - y) * width);
            top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }

    /// Resizes to `width`x`height` using nearest-neighbour sampling.
    pub fn scale(&mut self, width: u32, height: u32) {
        let resized = imageops::resize(&self.to_image(), width, height, FilterType::Nearest);
        *self = Self::from_image(&resized);
    }

    /// Converts to an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(colors::channels(self.color_buffer[y as usize * self.width as usize + x as usize]))
        })
    }

    /// Writes the buffer to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }
}
