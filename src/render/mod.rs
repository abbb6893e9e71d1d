//! Pixel-level rendering: frame and depth buffers, line and triangle
//! rasterization, and the per-mesh render driver.

pub mod depth;
pub mod framebuffer;
pub mod line;
pub mod rasterizer;
pub mod renderer;

pub use depth::DepthBuffer;
pub use framebuffer::FrameBuffer;
pub use line::draw_line;
pub use rasterizer::{fill_triangle, rasterize_triangle, FlatShader, PixelShader, TextureShader};
pub use renderer::{RenderMode, RenderSession, RenderStats};
