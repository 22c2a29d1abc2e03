//! Draws a static colored triangle through a fixed-function pipeline.
//!
//! SDL2 provides the window and input; drawing goes through the
//! [`graphics::GraphicsContext`] command set, implemented on the CPU by
//! [`render::SoftwareContext`].
//!
//! # Quick Start
//!
//! ```ignore
//! use tricolor::prelude::*;
//!
//! let config = WindowConfig::default();
//! let mut window = SdlWindow::open(&config)?;
//! prepare(&mut window, &config)?;
//!
//! let (send, recv) = exit_signal();
//! let mut frame_loop = FrameLoop::new(recv, KeyHandler::new(send));
//! frame_loop.run(&mut window, &Mesh::triangle())?;
//! ```

// Public API - exposed to library consumers
pub mod color;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod graphics;
pub mod input;
pub mod math;
pub mod mesh;
pub mod render;
pub mod renderable;
pub mod signal;
pub mod state;
pub mod vertex;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use error::{Error, Result};
pub use frame_loop::{FrameLoop, LoopExit, LoopReport};
pub use mesh::Mesh;
pub use renderable::Renderable;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use tricolor::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::color::Color;
    pub use crate::mesh::{Coloring, Mesh};
    pub use crate::renderable::{ColoredTriangle, Renderable};
    pub use crate::vertex::Vertex;

    // Drawing
    pub use crate::graphics::{GraphicsContext, RecordingContext};
    pub use crate::render::SoftwareContext;

    // Loop
    pub use crate::frame_loop::{FrameLoop, LoopExit, LoopReport};
    pub use crate::input::{Key, KeyHandler, KeyState};
    pub use crate::signal::{exit_signal, ExitReceiver, ExitSender};

    // Window
    pub use crate::window::{prepare, Event, SdlWindow, WindowConfig, WindowSystem};

    pub use crate::error::{Error, Result};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{fill_triangle, FlatShader, FrameBuffer, GouraudShader, ScreenVertex};
}
