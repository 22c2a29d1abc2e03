//! The fixed-function command set drawing code is written against.
//!
//! [`GraphicsContext`] mirrors the small slice of immediate-mode GL the
//! renderer needs: matrix stacks without the stack, a viewport, begin/end
//! primitive batches and a handful of static state switches. Two contexts
//! ship with the crate: [`crate::render::SoftwareContext`] rasterizes on the
//! CPU, [`RecordingContext`] only remembers what it was told.

mod recording;

pub use recording::{Command, RecordingContext};

/// Buffers cleared by [`GraphicsContext::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR_DEPTH: ClearMask = ClearMask {
        color: true,
        depth: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixMode {
    #[default]
    ModelView,
    Projection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadeModel {
    /// Whole triangle takes the color of its last vertex.
    Flat,
    /// Colors are interpolated across the triangle.
    #[default]
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthFunc {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

impl DepthFunc {
    /// Whether an incoming fragment at `incoming` replaces one at `stored`.
    #[inline]
    pub fn passes(self, incoming: f32, stored: f32) -> bool {
        match self {
            DepthFunc::Never => false,
            DepthFunc::Less => incoming < stored,
            DepthFunc::Equal => incoming == stored,
            DepthFunc::LessEqual => incoming <= stored,
            DepthFunc::Greater => incoming > stored,
            DepthFunc::NotEqual => incoming != stored,
            DepthFunc::GreaterEqual => incoming >= stored,
            DepthFunc::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    PerspectiveCorrection(HintMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMode {
    DontCare,
    Fastest,
    Nicest,
}

/// Immediate-mode drawing commands against the active rendering context.
///
/// Every drawing call must happen between a frame clear and the next buffer
/// swap. Implementations do not report errors; the fixed-function model has no
/// recoverable failure in steady state.
pub trait GraphicsContext {
    fn clear(&mut self, mask: ClearMask);
    fn matrix_mode(&mut self, mode: MatrixMode);
    fn load_identity(&mut self);
    /// Multiplies the current matrix by a translation.
    fn translate(&mut self, x: f32, y: f32, z: f32);
    /// Replaces the current matrix by `current * perspective(...)`.
    ///
    /// `fov_y` is in degrees, like `gluPerspective`.
    fn perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32);
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    fn begin(&mut self, primitive: Primitive);
    fn color(&mut self, r: f32, g: f32, b: f32);
    fn vertex(&mut self, x: f32, y: f32, z: f32);
    fn end(&mut self);

    fn shade_model(&mut self, model: ShadeModel);
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&mut self, depth: f32);
    fn enable(&mut self, capability: Capability);
    fn depth_func(&mut self, func: DepthFunc);
    fn hint(&mut self, hint: Hint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(DepthFunc::Less, 0.5, 0.5 => false)]
    #[test_case(DepthFunc::LessEqual, 0.5, 0.5 => true)]
    #[test_case(DepthFunc::LessEqual, 0.6, 0.5 => false)]
    #[test_case(DepthFunc::Greater, 0.6, 0.5 => true)]
    #[test_case(DepthFunc::Always, 1.0, 0.0 => true)]
    #[test_case(DepthFunc::Never, 0.0, 1.0 => false)]
    fn depth_comparisons(func: DepthFunc, incoming: f32, stored: f32) -> bool {
        func.passes(incoming, stored)
    }
}
