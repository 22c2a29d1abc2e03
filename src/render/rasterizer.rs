//! Edge function triangle rasterization.
//!
//! For an edge from A to B, the edge function at P is the 2D cross product
//! `(B - A) x (P - A)`:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! A pixel center is inside when all three edge functions share the sign of
//! the triangle's signed area, so both windings fill. Normalized by the area,
//! the edge values are the barycentric weights used to interpolate depth and
//! color.

use super::framebuffer::{pack, FrameBuffer};
use crate::graphics::DepthFunc;
use crate::math::vec3::Vec3;

/// A vertex after viewport mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel x/y with a top-left origin; z is window depth in `[0, 1]`.
    pub position: Vec3,
    /// Reciprocal of clip-space w, for perspective-correct interpolation.
    pub inv_w: f32,
    pub color: [f32; 3],
}

/// Computes a pixel's color from its barycentric weights.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> [f32; 3];
}

/// One color for the whole triangle.
pub struct FlatShader {
    color: [f32; 3],
}

impl FlatShader {
    pub fn new(color: [f32; 3]) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> [f32; 3] {
        self.color
    }
}

/// Interpolates vertex colors, in screen space or perspective-correct.
pub struct GouraudShader {
    colors: [[f32; 3]; 3],
    inv_w: Option<[f32; 3]>,
}

impl GouraudShader {
    pub fn new(vertices: &[ScreenVertex; 3], perspective_correct: bool) -> Self {
        Self {
            colors: vertices.map(|v| v.color),
            inv_w: perspective_correct.then(|| vertices.map(|v| v.inv_w)),
        }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> [f32; 3] {
        let weights = match self.inv_w {
            Some(inv_w) => {
                let w = [lambda[0] * inv_w[0], lambda[1] * inv_w[1], lambda[2] * inv_w[2]];
                let sum = w[0] + w[1] + w[2];
                if sum.abs() < f32::EPSILON {
                    lambda
                } else {
                    w.map(|x| x / sum)
                }
            }
            None => lambda,
        };

        let mut out = [0.0; 3];
        for (channel, value) in out.iter_mut().enumerate() {
            *value = weights[0] * self.colors[0][channel]
                + weights[1] * self.colors[1][channel]
                + weights[2] * self.colors[2][channel];
        }
        out
    }
}

#[inline]
fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Fills one triangle into `buffer`, sampling at pixel centers.
///
/// Degenerate (zero-area) triangles draw nothing.
pub fn fill_triangle<S: PixelShader>(
    vertices: &[ScreenVertex; 3],
    shader: &S,
    buffer: &mut FrameBuffer,
    depth_test: Option<DepthFunc>,
) {
    let [v0, v1, v2] = vertices.map(|v| v.position);

    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

    let area = edge_function(v0, v1, v2);
    if area.abs() < f32::EPSILON {
        return;
    }
    let inv_area = 1.0 / area;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

            let w0 = edge_function(v1, v2, p);
            let w1 = edge_function(v2, v0, p);
            let w2 = edge_function(v0, v1, p);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if !inside {
                continue;
            }

            let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
            let depth = lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z;
            let [r, g, b] = shader.shade(lambda);
            buffer.write_fragment(x, y, depth, pack([r, g, b, 1.0]), depth_test);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, color: [f32; 3]) -> ScreenVertex {
        ScreenVertex {
            position: Vec3::new(x, y, 0.5),
            inv_w: 1.0,
            color,
        }
    }

    #[test]
    fn fills_either_winding() {
        let ccw = [
            vertex(1.0, 1.0, [1.0; 3]),
            vertex(9.0, 1.0, [1.0; 3]),
            vertex(1.0, 9.0, [1.0; 3]),
        ];
        let cw = [ccw[0], ccw[2], ccw[1]];

        for tri in [ccw, cw] {
            let mut fb = FrameBuffer::new(10, 10, false);
            fill_triangle(&tri, &FlatShader::new([1.0, 0.0, 0.0]), &mut fb, None);
            assert_eq!(fb.get_pixel(2, 2), Some(0xFFFF0000));
            assert_eq!(fb.get_pixel(8, 8), Some(0));
        }
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let tri = [
            vertex(0.0, 0.0, [1.0; 3]),
            vertex(5.0, 5.0, [1.0; 3]),
            vertex(9.0, 9.0, [1.0; 3]),
        ];
        let mut fb = FrameBuffer::new(10, 10, false);
        fill_triangle(&tri, &FlatShader::new([1.0; 3]), &mut fb, None);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn gouraud_weights_sum_vertex_colors() {
        let tri = [
            vertex(0.0, 0.0, [1.0, 0.0, 0.0]),
            vertex(1.0, 0.0, [0.0, 1.0, 0.0]),
            vertex(0.0, 1.0, [0.0, 0.0, 1.0]),
        ];
        let shader = GouraudShader::new(&tri, false);

        assert_eq!(shader.shade([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]);
        let mixed = shader.shade([0.5, 0.25, 0.25]);
        assert_relative_eq!(mixed[0], 0.5);
        assert_relative_eq!(mixed[1], 0.25);
        assert_relative_eq!(mixed[2], 0.25);
    }

    #[test]
    fn perspective_correction_favors_nearer_vertex() {
        let mut tri = [
            vertex(0.0, 0.0, [1.0, 0.0, 0.0]),
            vertex(1.0, 0.0, [0.0, 1.0, 0.0]),
            vertex(0.0, 1.0, [0.0, 0.0, 1.0]),
        ];
        tri[0].inv_w = 1.0;
        tri[1].inv_w = 0.25;
        tri[2].inv_w = 0.25;

        let linear = GouraudShader::new(&tri, false).shade([1.0 / 3.0; 3]);
        let correct = GouraudShader::new(&tri, true).shade([1.0 / 3.0; 3]);

        assert!(correct[0] > linear[0]);
        assert_relative_eq!(correct.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }
}
