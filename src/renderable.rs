//! Things the frame loop can draw.

use crate::color::Color;
use crate::graphics::{GraphicsContext, Primitive};

/// Anything that can emit its own drawing commands.
///
/// Called once per frame, after the frame has been cleared and the camera
/// transform applied, before the buffers are swapped.
pub trait Renderable {
    fn render(&self, ctx: &mut dyn GraphicsContext);
}

/// The hardcoded red/green/blue triangle, drawn in a single batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredTriangle;

impl ColoredTriangle {
    pub const CORNERS: [([f32; 3], Color); 3] = [
        ([0.0, 1.0, 0.0], Color::RED),
        ([-1.0, -1.0, 0.0], Color::GREEN),
        ([1.0, -1.0, 0.0], Color::BLUE),
    ];
}

impl Renderable for ColoredTriangle {
    fn render(&self, ctx: &mut dyn GraphicsContext) {
        ctx.begin(Primitive::Triangles);
        for ([x, y, z], color) in Self::CORNERS {
            let [r, g, b] = color.to_rgb_f32();
            ctx.color(r, g, b);
            ctx.vertex(x, y, z);
        }
        ctx.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Command, RecordingContext};

    #[test]
    fn triangle_emits_one_batch_with_colored_corners() {
        let mut ctx = RecordingContext::new();
        ColoredTriangle.render(&mut ctx);

        assert_eq!(
            ctx.commands(),
            &[
                Command::Begin(Primitive::Triangles),
                Command::Color(1.0, 0.0, 0.0),
                Command::Vertex(0.0, 1.0, 0.0),
                Command::Color(0.0, 1.0, 0.0),
                Command::Vertex(-1.0, -1.0, 0.0),
                Command::Color(0.0, 0.0, 1.0),
                Command::Vertex(1.0, -1.0, 0.0),
                Command::End,
            ]
        );
    }
}
