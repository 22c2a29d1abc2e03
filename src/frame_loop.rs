//! The per-frame clear, draw, present cycle.
//!
//! Each iteration checks whether the window is still open and whether an exit
//! code is pending, without blocking. If neither stops it, the loop draws one
//! frame, swaps buffers, then polls and dispatches window events. An Escape
//! seen during the poll is therefore picked up at the top of the next
//! iteration, before anything else is drawn.

use crate::error::Result;
use crate::graphics::{ClearMask, GraphicsContext};
use crate::input::KeyHandler;
use crate::renderable::Renderable;
use crate::signal::ExitReceiver;
use crate::state::configure_viewport;
use crate::window::{Event, WindowSystem};

/// Fixed camera translation applied to the model-view matrix every frame.
pub const CAMERA_OFFSET: [f32; 3] = [-1.5, 0.0, -6.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// An exit code was raised.
    Signaled(i32),
    /// The window reported closed.
    WindowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: LoopExit,
    /// Draw cycles completed before stopping.
    pub frames: u64,
}

pub struct FrameLoop {
    exit: ExitReceiver,
    keys: KeyHandler,
    frames: u64,
}

impl FrameLoop {
    pub fn new(exit: ExitReceiver, keys: KeyHandler) -> Self {
        Self {
            exit,
            keys,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs until the window closes or an exit code is raised.
    ///
    /// A failure to present or to follow a window event ends the loop with
    /// that error.
    pub fn run<W: WindowSystem>(
        &mut self,
        window: &mut W,
        scene: &dyn Renderable,
    ) -> Result<LoopReport> {
        loop {
            if let Some(exit) = self.step(window, scene)? {
                return Ok(LoopReport {
                    exit,
                    frames: self.frames,
                });
            }
        }
    }

    /// One iteration. Returns why the loop stopped, or `None` to keep going.
    pub fn step<W: WindowSystem>(
        &mut self,
        window: &mut W,
        scene: &dyn Renderable,
    ) -> Result<Option<LoopExit>> {
        if !window.is_open() {
            log::info!("window closed");
            return Ok(Some(LoopExit::WindowClosed));
        }
        if let Some(code) = self.exit.try_take() {
            log::info!("Received exit code: {code}");
            return Ok(Some(LoopExit::Signaled(code)));
        }

        draw(window.context_mut(), scene);
        window.swap_buffers()?;
        self.frames += 1;

        for event in window.poll_events()? {
            self.dispatch(window, event);
        }
        Ok(None)
    }

    fn dispatch<W: WindowSystem>(&self, window: &mut W, event: Event) {
        match event {
            Event::Resize(width, height) => configure_viewport(window.context_mut(), width, height),
            Event::Key { key, state } => {
                self.keys.on_key(key, state);
            }
            Event::CloseRequested => window.close(),
        }
    }
}

/// Clears the frame, positions the camera and draws `scene`.
pub fn draw(ctx: &mut dyn GraphicsContext, scene: &dyn Renderable) {
    let [x, y, z] = CAMERA_OFFSET;
    ctx.clear(ClearMask::COLOR_DEPTH);
    ctx.load_identity();
    ctx.translate(x, y, z);
    scene.render(ctx);
}
