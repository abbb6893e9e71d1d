//! Per-face Lambert lighting.

use crate::math::vec3::Vec3;

/// A light at infinity: every face sees it from the same direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector the light travels along (from the light into the scene).
    pub direction: Vec3,
}

impl DirectionalLight {
    /// `direction` is normalized; a zero vector stays zero and lights nothing.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    /// Lambert factor for a face with unit normal `normal`:
    /// `normal . (0 - direction)`.
    ///
    /// Not clamped. Zero or negative means the face is turned away from the
    /// light, which the renderer also treats as not visible.
    pub fn light_level(&self, normal: Vec3) -> f32 {
        normal.dot(Vec3::ZERO - self.direction)
    }
}

impl Default for DirectionalLight {
    /// Shines into the screen along -Z, straight at camera-facing faces.
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}

/// Unit normal of the triangle `v0 v1 v2`, computed as `(v1 - v0) x (v2 - v0)`.
///
/// Counter-clockwise triangles (seen from +Z) get a normal pointing to +Z.
pub fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
    let [v0, v1, v2] = *vertices;
    (v1 - v0).cross(v2 - v0).normalize()
}
