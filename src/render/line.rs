//! Integer line drawing.

use log::warn;

use super::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2i;

/// Draws a line from `p0` to `p1` using Bresenham's algorithm.
///
/// Lines are never clipped: if either endpoint lies outside
/// `[0, width] x [0, height]` the whole call is rejected with a warning and
/// nothing is drawn. The far endpoint itself is not plotted.
///
/// Returns the number of pixels plotted. Points on the far edges
/// (`x == width` or `y == height`) pass the bounds check but fall outside
/// the buffer, so they are neither written nor counted.
///
/// The algorithm only uses integer arithmetic. Steep lines are transposed so
/// the major axis is always x, and points are ordered left to right. An error
/// term, doubled to avoid fractions, accumulates `2*|dy|` per step in x; once
/// it passes `dx` the line steps one pixel in y and pays back `2*dx`.
pub fn draw_line(p0: Vec2i, p1: Vec2i, buffer: &mut FrameBuffer, color: u32) -> usize {
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let in_bounds = |p: Vec2i| p.x >= 0 && p.x <= width && p.y >= 0 && p.y <= height;
    if !in_bounds(p0) || !in_bounds(p1) {
        warn!(
            "draw_line: ({}, {}) -> ({}, {}) is outside the {}x{} image, skipped",
            p0.x, p0.y, p1.x, p1.y, width, height
        );
        return 0;
    }

    let (mut x0, mut y0, mut x1, mut y1) = (p0.x, p0.y, p1.x, p1.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x1 < x0 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let slope2x = dy.abs() * 2;
    let y_step = if y1 > y0 { 1 } else { -1 };
    let mut error2x = 0;
    let mut y = y0;
    let mut plotted = 0;

    for x in x0..x1 {
        let (px, py) = if steep { (y, x) } else { (x, y) };
        if px < width && py < height {
            buffer.set_pixel(px, py, color);
            plotted += 1;
        }

        error2x += slope2x;
        if error2x > dx {
            y += y_step;
            error2x -= 2 * dx;
        }
    }
    plotted
}
