//! CPU rasterizer behind [`crate::graphics::GraphicsContext`].

mod context;
pub(crate) mod framebuffer;
mod rasterizer;

pub use context::SoftwareContext;
pub use framebuffer::FrameBuffer;
pub use rasterizer::{fill_triangle, FlatShader, GouraudShader, PixelShader, ScreenVertex};
