//! The render driver.
//!
//! A [`RenderSession`] bundles everything one render needs (mesh, texture,
//! camera, light) and draws the mesh into a [`FrameBuffer`] face by face.
//!
//! Per face, the textured pipeline is:
//! 1. fetch the world-space corners and texture coordinates,
//! 2. compute the unit face normal and its light level,
//! 3. skip the face if the light level is zero or negative,
//! 4. project the corners to screen space,
//! 5. rasterize with depth testing and the texture shader.
//!
//! The depth buffer lives only for the duration of one [`RenderSession::render`]
//! call and is released on return.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::depth::DepthBuffer;
use super::framebuffer::FrameBuffer;
use super::line::draw_line;
use super::rasterizer::{fill_triangle, rasterize_triangle, TextureShader};
use crate::colors;
use crate::light::{face_normal, DirectionalLight};
use crate::mesh::Mesh;
use crate::projection::{orthographic, Projector};
use crate::texture::Texture;

/// What a render draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Face edges as white lines, orthographic.
    Wireframe,
    /// Faces filled with a light-scaled white, orthographic, no depth test.
    Flat,
    /// Perspective, depth-tested, textured and lit.
    #[default]
    Textured,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "wireframe"),
            RenderMode::Flat => write!(f, "flat"),
            RenderMode::Textured => write!(f, "textured"),
        }
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wireframe" => Ok(RenderMode::Wireframe),
            "flat" => Ok(RenderMode::Flat),
            "textured" => Ok(RenderMode::Textured),
            other => Err(format!("unknown render mode '{other}'")),
        }
    }
}

/// Counters describing one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Faces that reached the rasterizer.
    pub faces_drawn: usize,
    /// Faces skipped because they face away from the light.
    pub faces_rejected: usize,
    /// Pixels written (lines count every plotted pixel).
    pub pixels_written: usize,
}

/// Parameters of one render invocation.
pub struct RenderSession<'a> {
    mesh: &'a Mesh,
    texture: &'a Texture,
    camera_distance: f32,
    light: DirectionalLight,
}

impl<'a> RenderSession<'a> {
    pub fn new(mesh: &'a Mesh, texture: &'a Texture, camera_distance: f32, light: DirectionalLight) -> Self {
        Self {
            mesh,
            texture,
            camera_distance,
            light,
        }
    }

    /// Draws the mesh into `buffer` using `mode`.
    pub fn render(&self, mode: RenderMode, buffer: &mut FrameBuffer) -> RenderStats {
        let stats = match mode {
            RenderMode::Wireframe => self.render_wireframe(buffer),
            RenderMode::Flat => self.render_flat(buffer),
            RenderMode::Textured => self.render_textured(buffer),
        };
        debug!(
            "{mode} render: {} faces drawn, {} rejected, {} pixels written",
            stats.faces_drawn, stats.faces_rejected, stats.pixels_written
        );
        stats
    }

    fn render_wireframe(&self, buffer: &mut FrameBuffer) -> RenderStats {
        let (width, height) = (buffer.width(), buffer.height());
        let mut stats = RenderStats::default();

        for face in self.mesh.faces() {
            let corners = self.mesh.face_vertices(face).map(|v| orthographic(v, width, height));
            for j in 0..3 {
                stats.pixels_written += draw_line(corners[j], corners[(j + 1) % 3], buffer, colors::WHITE);
            }
            stats.faces_drawn += 1;
        }
        stats
    }

    fn render_flat(&self, buffer: &mut FrameBuffer) -> RenderStats {
        let (width, height) = (buffer.width(), buffer.height());
        let mut stats = RenderStats::default();

        for face in self.mesh.faces() {
            let world = self.mesh.face_vertices(face);
            let light_level = self.light.light_level(face_normal(&world));
            if light_level <= 0.0 {
                stats.faces_rejected += 1;
                continue;
            }

            let pts = world.map(|v| orthographic(v, width, height));
            let color = colors::scale_rgb(colors::WHITE, light_level);
            stats.pixels_written += fill_triangle(pts, buffer, color);
            stats.faces_drawn += 1;
        }
        stats
    }

    fn render_textured(&self, buffer: &mut FrameBuffer) -> RenderStats {
        let projector = Projector::new(self.camera_distance, buffer.width());
        let mut depth = DepthBuffer::new(buffer.width(), buffer.height());
        let mut stats = RenderStats::default();

        for face in self.mesh.faces() {
            let world = self.mesh.face_vertices(face);
            let light_level = self.light.light_level(face_normal(&world));
            if light_level <= 0.0 {
                stats.faces_rejected += 1;
                continue;
            }

            let screen = world.map(|v| projector.project(v));
            let shader = TextureShader::new(self.texture, self.mesh.face_texcoords(face), light_level);
            stats.pixels_written += rasterize_triangle(screen, &mut depth, buffer, &shader);
            stats.faces_drawn += 1;
        }
        stats
    }
}
