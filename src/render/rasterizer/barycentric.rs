//! Barycentric coordinates of a pixel relative to a screen-space triangle.
//!
//! # Formulation
//!
//! A point P inside triangle ABC can be written as
//!
//! ```text
//! P = A + u * (B - A) + v * (C - A)
//! ```
//!
//! which rearranges to `u * AB + v * AC + PA = 0`. Taken per axis, the vector
//! `(u, v, 1)` is orthogonal to both
//!
//! ```text
//! (AB.x, AC.x, PA.x)   and   (AB.y, AC.y, PA.y)
//! ```
//!
//! so it is their cross product divided by its z component. The weights are
//! then `(1 - u - v, u, v)`, one per vertex in the order the vertices were
//! given.
//!
//! The z component of the cross product is twice the signed area of the
//! triangle. When its magnitude is below one the triangle covers less than
//! half a pixel and is treated as degenerate.

use crate::math::vec2::Vec2i;
use crate::math::vec3::Vec3;

/// Weights returned for degenerate triangles. The negative first component
/// makes every inside test fail.
pub const DEGENERATE: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Computes the barycentric weights of `p` relative to triangle `pts`.
///
/// Component *i* of the result is the weight of `pts[i]`. Near-zero-area
/// triangles yield [`DEGENERATE`] for every pixel, so callers must test the
/// signs of the weights rather than expect an error.
///
/// Differences are taken in `f32`: projected vertices near the camera plane
/// saturate to `i32::MIN`/`i32::MAX`, which integer subtraction cannot hold.
pub fn barycentric(pts: &[Vec2i; 3], p: Vec2i) -> Vec3 {
    let [a, b, c] = (*pts).map(|q| (q.x as f32, q.y as f32));
    let (px, py) = (p.x as f32, p.y as f32);
    let vx = Vec3::new(b.0 - a.0, c.0 - a.0, a.0 - px);
    let vy = Vec3::new(b.1 - a.1, c.1 - a.1, a.1 - py);
    let n = vx.cross(vy);

    if n.z.abs() < 1.0 {
        return DEGENERATE;
    }

    let u = n.x / n.z;
    let v = n.y / n.z;
    Vec3::new(1.0 - u - v, u, v)
}
