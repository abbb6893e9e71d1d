//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides which pixels a triangle covers and passes their
//! barycentric weights on; a shader turns those weights into a colour.
//!
//! # Barycentric Coordinates
//!
//! The weights `(w0, w1, w2)` sum to 1.0 and interpolate any per-vertex
//! attribute: `attr = w0 * attr0 + w1 * attr1 + w2 * attr2`. Interpolation is
//! linear in screen space; it is not corrected for perspective.

use crate::colors::scale_rgb;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Per-pixel colour computation.
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric weights.
    fn shade(&self, weights: Vec3) -> u32;
}

/// Returns one colour for the whole triangle.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _weights: Vec3) -> u32 {
        self.color
    }
}

/// Samples a diffuse texture at the interpolated UV and scales the result's
/// RGB channels by a per-face light level.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    light_level: f32,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], light_level: f32) -> Self {
        Self {
            texture,
            uvs,
            light_level,
        }
    }

    /// Interpolate UV coordinates using barycentric weights
    #[inline]
    fn interpolate_uv(&self, weights: Vec3) -> Vec2 {
        let u = Vec3::new(self.uvs[0].x, self.uvs[1].x, self.uvs[2].x);
        let v = Vec3::new(self.uvs[0].y, self.uvs[1].y, self.uvs[2].y);
        Vec2::new(weights.dot(u), weights.dot(v))
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, weights: Vec3) -> u32 {
        let uv = self.interpolate_uv(weights);
        scale_rgb(self.texture.sample(uv.x, uv.y), self.light_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::render::framebuffer::FrameBuffer;

    /// 2x2 texture: red, green on the bottom row; blue, white on top.
    fn quad_texture() -> Texture {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel(0, 0, colors::RED);
        fb.set_pixel(1, 0, colors::GREEN);
        fb.set_pixel(0, 1, colors::BLUE);
        fb.set_pixel(1, 1, colors::WHITE);
        Texture::from_framebuffer(fb)
    }

    #[test]
    fn flat_shader_ignores_weights() {
        let shader = FlatShader::new(colors::RED);
        assert_eq!(shader.shade(Vec3::new(0.2, 0.3, 0.5)), colors::RED);
    }

    #[test]
    fn texture_shader_samples_interpolated_uv() {
        let texture = quad_texture();
        let uvs = [Vec2::new(0.1, 0.1), Vec2::new(0.9, 0.1), Vec2::new(0.1, 0.9)];
        let shader = TextureShader::new(&texture, uvs, 1.0);

        assert_eq!(shader.shade(Vec3::new(1.0, 0.0, 0.0)), colors::RED);
        assert_eq!(shader.shade(Vec3::new(0.0, 1.0, 0.0)), colors::GREEN);
        assert_eq!(shader.shade(Vec3::new(0.0, 0.0, 1.0)), colors::BLUE);
    }

    #[test]
    fn texture_shader_applies_light_level() {
        let texture = quad_texture();
        let uvs = [Vec2::new(0.75, 0.75); 3];
        let shader = TextureShader::new(&texture, uvs, 0.5);
        assert_eq!(
            shader.shade(Vec3::new(0.3, 0.3, 0.4)),
            colors::rgba(127, 127, 127, 255)
        );
    }
}
