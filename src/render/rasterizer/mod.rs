//! Triangle rasterization.
//!
//! Both entry points walk the triangle's bounding box, clamped to the frame
//! buffer, and compute barycentric weights for every pixel in it:
//!
//! - [`fill_triangle`] paints covered pixels a solid colour. No depth test.
//! - [`rasterize_triangle`] interpolates depth, runs the z-buffer test and
//!   hands surviving pixels to a [`PixelShader`].
//!
//! The two modes use different inside tolerances ([`FILL_EPSILON`] and
//! [`DEPTH_TESTED_EPSILON`]); they are kept separate on purpose.

mod barycentric;
mod shader;

pub use barycentric::{barycentric, DEGENERATE};
pub use shader::{FlatShader, PixelShader, TextureShader};

use super::depth::DepthBuffer;
use super::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2i;
use crate::math::vec3::Vec3;

/// Inside-test slack for plain solid fills.
pub const FILL_EPSILON: f32 = 1e-5;

/// Inside-test slack for depth-tested rasterization: none.
pub const DEPTH_TESTED_EPSILON: f32 = 0.0;

/// Pixel-space bounding box of `pts`, clamped to `[0, width-1] x [0, height-1]`.
///
/// Returns None when the clamped box is empty.
fn bounding_box(pts: &[Vec2i; 3], width: u32, height: u32) -> Option<(Vec2i, Vec2i)> {
    if width == 0 || height == 0 {
        return None;
    }
    let min = Vec2i::new(
        pts.iter().map(|p| p.x).min()?.max(0),
        pts.iter().map(|p| p.y).min()?.max(0),
    );
    let max = Vec2i::new(
        pts.iter().map(|p| p.x).max()?.min(width as i32 - 1),
        pts.iter().map(|p| p.y).max()?.min(height as i32 - 1),
    );
    (min.x <= max.x && min.y <= max.y).then_some((min, max))
}

#[inline]
fn is_inside(weights: Vec3, epsilon: f32) -> bool {
    weights.x >= -epsilon && weights.y >= -epsilon && weights.z >= -epsilon
}

/// Calls `visit` with the position and weights of every pixel of the
/// bounding box that passes the inside test.
fn for_each_covered_pixel<F>(pts: &[Vec2i; 3], width: u32, height: u32, epsilon: f32, mut visit: F)
where
    F: FnMut(Vec2i, Vec3),
{
    let Some((min, max)) = bounding_box(pts, width, height) else {
        return;
    };
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let p = Vec2i::new(x, y);
            let weights = barycentric(pts, p);
            if is_inside(weights, epsilon) {
                visit(p, weights);
            }
        }
    }
}

/// Fills a triangle with a solid colour. Returns the number of pixels written.
pub fn fill_triangle(pts: [Vec2i; 3], buffer: &mut FrameBuffer, color: u32) -> usize {
    let shader = FlatShader::new(color);
    let mut written = 0;
    for_each_covered_pixel(&pts, buffer.width(), buffer.height(), FILL_EPSILON, |p, weights| {
        buffer.set_pixel(p.x, p.y, shader.shade(weights));
        written += 1;
    });
    written
}

/// Rasterizes a screen-space triangle with depth testing.
///
/// `points` hold pixel x/y and screen depth z. x and y are truncated to whole
/// pixels; depth is interpolated from the float z values and truncated to an
/// integer. A pixel is shaded and written only if its depth is strictly
/// greater than the depth buffer's; otherwise it is left untouched.
///
/// Returns the number of pixels written.
pub fn rasterize_triangle<S: PixelShader>(
    points: [Vec3; 3],
    depth: &mut DepthBuffer,
    buffer: &mut FrameBuffer,
    shader: &S,
) -> usize {
    debug_assert_eq!(depth.width(), buffer.width());
    debug_assert_eq!(depth.height(), buffer.height());

    let pts = points.map(|p| Vec2i::new(p.x as i32, p.y as i32));
    let z = Vec3::new(points[0].z, points[1].z, points[2].z);
    let mut written = 0;

    for_each_covered_pixel(
        &pts,
        buffer.width(),
        buffer.height(),
        DEPTH_TESTED_EPSILON,
        |p, weights| {
            let pixel_depth = weights.dot(z) as i32;
            if depth.test_and_set(p.x, p.y, pixel_depth) {
                buffer.set_pixel(p.x, p.y, shader.shade(weights));
                written += 1;
            }
        },
    );
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    fn count(buffer: &FrameBuffer, color: u32) -> usize {
        buffer.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn bounding_box_is_clamped_to_buffer() {
        let pts = [Vec2i::new(-5, 2), Vec2i::new(30, 4), Vec2i::new(3, 50)];
        let (min, max) = bounding_box(&pts, 10, 20).unwrap();
        assert_eq!(min, Vec2i::new(0, 2));
        assert_eq!(max, Vec2i::new(9, 19));
    }

    #[test]
    fn bounding_box_outside_buffer_is_empty() {
        let pts = [Vec2i::new(-9, -9), Vec2i::new(-5, -2), Vec2i::new(-1, -7)];
        assert!(bounding_box(&pts, 10, 10).is_none());
    }

    #[test]
    fn fill_writes_exactly_the_covered_pixels() {
        let pts = [Vec2i::new(1, 1), Vec2i::new(8, 2), Vec2i::new(3, 8)];
        let mut fb = FrameBuffer::new(10, 10);
        let written = fill_triangle(pts, &mut fb, colors::RED);

        let mut expected = 0;
        for y in 0..10 {
            for x in 0..10 {
                let inside = is_inside(barycentric(&pts, Vec2i::new(x, y)), FILL_EPSILON);
                let color = fb.get_pixel(x, y).unwrap();
                assert_eq!(color == colors::RED, inside, "pixel ({x}, {y})");
                expected += inside as usize;
            }
        }
        assert_eq!(written, expected);
        assert!(written > 0);
    }

    #[test]
    fn fill_of_degenerate_triangle_writes_nothing() {
        let pts = [Vec2i::new(0, 0), Vec2i::new(4, 4), Vec2i::new(8, 8)];
        let mut fb = FrameBuffer::new(10, 10);
        assert_eq!(fill_triangle(pts, &mut fb, colors::RED), 0);
        assert_eq!(count(&fb, colors::RED), 0);
    }

    #[test]
    fn fill_partially_offscreen_triangle_stays_in_bounds() {
        let pts = [Vec2i::new(-10, -10), Vec2i::new(30, 0), Vec2i::new(0, 30)];
        let mut fb = FrameBuffer::new(10, 10);
        let written = fill_triangle(pts, &mut fb, colors::RED);
        assert_eq!(written, 100);
        assert_eq!(count(&fb, colors::RED), 100);
    }

    #[test]
    fn depth_tested_triangle_writes_each_covered_pixel_once() {
        let points = [
            Vec3::new(1.0, 1.0, 10.5),
            Vec3::new(12.0, 2.0, 10.5),
            Vec3::new(4.0, 13.0, 10.5),
        ];
        let mut fb = FrameBuffer::new(16, 16);
        let mut depth = DepthBuffer::new(16, 16);
        let written = rasterize_triangle(points, &mut depth, &mut fb, &FlatShader::new(colors::RED));

        assert!(written > 0);
        assert_eq!(count(&fb, colors::RED), written);

        let pts = points.map(|p| Vec2i::new(p.x as i32, p.y as i32));
        for y in 0..16 {
            for x in 0..16 {
                let inside = is_inside(barycentric(&pts, Vec2i::new(x, y)), DEPTH_TESTED_EPSILON);
                let expected_depth = if inside { 10 } else { i32::MIN };
                assert_eq!(depth.get(x, y), Some(expected_depth), "pixel ({x}, {y})");
            }
        }

        // A second pass at the same depth loses every tie.
        let again = rasterize_triangle(points, &mut depth, &mut fb, &FlatShader::new(colors::BLUE));
        assert_eq!(again, 0);
        assert_eq!(count(&fb, colors::BLUE), 0);
    }

    #[test]
    fn nearer_triangle_occludes_farther_one_in_either_order() {
        let near = [
            Vec3::new(0.0, 0.0, 50.5),
            Vec3::new(9.0, 0.0, 50.5),
            Vec3::new(0.0, 9.0, 50.5),
        ];
        let far = near.map(|p| Vec3::new(p.x, p.y, 20.5));

        for order in [[near, far], [far, near]] {
            let mut fb = FrameBuffer::new(10, 10);
            let mut depth = DepthBuffer::new(10, 10);
            for (tri, color) in order.iter().zip([colors::RED, colors::GREEN]) {
                rasterize_triangle(*tri, &mut depth, &mut fb, &FlatShader::new(color));
            }
            let near_color = if order[0] == near { colors::RED } else { colors::GREEN };
            assert_eq!(fb.get_pixel(1, 1), Some(near_color));
            assert_eq!(depth.get(1, 1), Some(50));
        }
    }

    #[test]
    fn depth_is_interpolated_and_truncated() {
        let points = [
            Vec3::new(0.0, 0.0, 0.5),
            Vec3::new(10.0, 0.0, 10.5),
            Vec3::new(0.0, 10.0, 0.5),
        ];
        let mut fb = FrameBuffer::new(12, 12);
        let mut depth = DepthBuffer::new(12, 12);
        rasterize_triangle(points, &mut depth, &mut fb, &FlatShader::new(colors::RED));
        // Weight of the second vertex at (3, 2) is 0.3.
        assert_eq!(depth.get(3, 2), Some(3));
        assert_eq!(depth.get(0, 5), Some(0));
    }
}
