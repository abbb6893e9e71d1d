//! Perspective projection for a fixed camera.
//!
//! The camera sits on the +Z axis at `camera_z`, looking down -Z at the
//! origin. There is no view matrix: world space is camera-aligned, and the
//! only free parameter is the camera distance.

use crate::math::vec2::Vec2i;
use crate::math::vec3::Vec3;

/// Maps world-space points to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Distance of the camera from the origin along +Z.
    camera_z: f32,
    /// Half the frame buffer width; maps [-1, 1] to [0, width].
    scale: f32,
}

impl Projector {
    /// Creates a projector for a frame buffer `framebuffer_width` pixels wide.
    ///
    /// # Arguments
    /// * `camera_z` - Camera distance from the origin (must be non-zero)
    /// * `framebuffer_width` - Width of the target, used for x, y and z scaling
    pub fn new(camera_z: f32, framebuffer_width: u32) -> Self {
        Self {
            camera_z,
            scale: framebuffer_width as f32 / 2.0,
        }
    }

    pub fn camera_z(&self) -> f32 {
        self.camera_z
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Projects a world-space point to screen space.
    ///
    /// Points are shrunk by `coef = 1 / (1 - z / camera_z)`, then each axis
    /// maps [-1, 1] onto [0, 2 * scale]. The screen z keeps the world z sign:
    /// larger is closer to the camera.
    pub fn project(&self, world: Vec3) -> Vec3 {
        let coef = 1.0 / (1.0 - world.z / self.camera_z);
        (world * coef + Vec3::ONE) * self.scale
    }
}

/// Orthographic mapping used by the wireframe and flat modes:
/// `x = (v.x + 1) * width / 2`, `y = (v.y + 1) * height / 2`.
pub fn orthographic(world: Vec3, width: u32, height: u32) -> Vec2i {
    Vec2i::new(
        ((world.x + 1.0) * width as f32 / 2.0) as i32,
        ((world.y + 1.0) * height as f32 / 2.0) as i32,
    )
}
