//! One-time render state and the size-dependent projection setup.

use crate::graphics::{
    Capability, DepthFunc, GraphicsContext, Hint, HintMode, MatrixMode, ShadeModel,
};

/// Vertical field of view in degrees.
pub const FOV_Y: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Configures the state that does not depend on the window size.
///
/// Smooth shading, a transparent black clear color, depth cleared to 1.0 and
/// tested with `LessEqual`, and the nicest perspective correction.
pub fn configure_static_state(ctx: &mut dyn GraphicsContext) {
    ctx.shade_model(ShadeModel::Smooth);
    ctx.clear_color(0.0, 0.0, 0.0, 0.0);
    ctx.clear_depth(1.0);
    ctx.enable(Capability::DepthTest);
    ctx.depth_func(DepthFunc::LessEqual);
    ctx.hint(Hint::PerspectiveCorrection(HintMode::Nicest));
}

/// Sets the viewport and rebuilds the projection for a `width` x `height` window.
///
/// Leaves the model-view matrix selected and reset to identity. A zero height
/// is clamped to 1 for the aspect ratio; the viewport keeps the real size.
pub fn configure_viewport(ctx: &mut dyn GraphicsContext, width: u32, height: u32) {
    let aspect = aspect_ratio(width, height);

    ctx.viewport(0, 0, width, height);
    ctx.matrix_mode(MatrixMode::Projection);
    ctx.load_identity();
    ctx.perspective(FOV_Y, aspect, Z_NEAR, Z_FAR);
    ctx.matrix_mode(MatrixMode::ModelView);
    ctx.load_identity();
}

pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        log::debug!("zero window height, clamping to 1 for the aspect ratio");
    }
    width as f32 / height.max(1) as f32
}
