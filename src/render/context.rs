use image::RgbaImage;

use super::framebuffer::{pack, FrameBuffer};
use super::rasterizer::{fill_triangle, FlatShader, GouraudShader, ScreenVertex};
use crate::graphics::{
    Capability, ClearMask, DepthFunc, GraphicsContext, Hint, HintMode, MatrixMode, Primitive,
    ShadeModel,
};
use crate::math::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

/// A vertex as submitted: already in clip space, with the color current at
/// the time of the `vertex` call.
#[derive(Debug, Clone, Copy)]
struct ClipVertex {
    position: Vec4,
    color: [f32; 3],
}

/// CPU implementation of the fixed-function command set.
///
/// Vertices are transformed when submitted, using the matrices current at
/// that moment, and rasterized when their batch ends. Triangles with a vertex
/// on or behind the eye plane are dropped rather than clipped. An incomplete
/// trailing triangle in a batch draws nothing.
pub struct SoftwareContext {
    framebuffer: FrameBuffer,
    viewport: Viewport,
    matrix_mode: MatrixMode,
    projection: Mat4,
    model_view: Mat4,
    clear_color: [f32; 4],
    clear_depth: f32,
    depth_test: bool,
    depth_func: DepthFunc,
    shade_model: ShadeModel,
    perspective_hint: HintMode,
    current_color: [f32; 3],
    batch: Option<Vec<ClipVertex>>,
}

impl SoftwareContext {
    /// Creates a context drawing into a `width` x `height` frame.
    ///
    /// `depth_bits` of zero allocates no depth buffer.
    pub fn new(width: u32, height: u32, depth_bits: u8) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height, depth_bits > 0),
            viewport: Viewport {
                x: 0,
                y: 0,
                width,
                height,
            },
            matrix_mode: MatrixMode::default(),
            projection: Mat4::identity(),
            model_view: Mat4::identity(),
            clear_color: [0.0; 4],
            clear_depth: 1.0,
            depth_test: false,
            depth_func: DepthFunc::default(),
            shade_model: ShadeModel::default(),
            perspective_hint: HintMode::DontCare,
            current_color: [1.0; 3],
            batch: None,
        }
    }

    /// Reallocates the frame for a new window size.
    ///
    /// The viewport is left alone; callers set it explicitly.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width, height);
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    /// ARGB8888 pixel at `(x, y)`, top-left origin.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.framebuffer.get_pixel(x, y)
    }

    /// The frame as ARGB8888 bytes, rows top to bottom.
    pub fn frame_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    pub fn snapshot(&self) -> RgbaImage {
        self.framebuffer.to_image()
    }

    fn current_matrix(&mut self) -> &mut Mat4 {
        match self.matrix_mode {
            MatrixMode::ModelView => &mut self.model_view,
            MatrixMode::Projection => &mut self.projection,
        }
    }

    fn depth_test(&self) -> Option<DepthFunc> {
        self.depth_test.then_some(self.depth_func)
    }

    /// Clip space to window coordinates, flipping y to a top-left origin.
    fn to_screen(&self, vertex: &ClipVertex) -> Option<ScreenVertex> {
        let ndc = vertex.position.to_ndc()?;
        let vp = self.viewport;
        let window_x = vp.x as f32 + (ndc.x + 1.0) * 0.5 * vp.width as f32;
        let window_y = vp.y as f32 + (ndc.y + 1.0) * 0.5 * vp.height as f32;
        Some(ScreenVertex {
            position: Vec3::new(
                window_x,
                self.framebuffer.height() as f32 - window_y,
                (ndc.z + 1.0) * 0.5,
            ),
            inv_w: 1.0 / vertex.position.w,
            color: vertex.color,
        })
    }

    fn draw_triangle(&mut self, triangle: &[ClipVertex]) {
        let [a, b, c] = [&triangle[0], &triangle[1], &triangle[2]];
        let (Some(a), Some(b), Some(c)) = (self.to_screen(a), self.to_screen(b), self.to_screen(c))
        else {
            return;
        };
        let vertices = [a, b, c];
        let depth_test = self.depth_test();

        match self.shade_model {
            ShadeModel::Flat => {
                // The last vertex of a triangle provides its color.
                let shader = FlatShader::new(c.color);
                fill_triangle(&vertices, &shader, &mut self.framebuffer, depth_test);
            }
            ShadeModel::Smooth => {
                let correct = self.perspective_hint == HintMode::Nicest;
                let shader = GouraudShader::new(&vertices, correct);
                fill_triangle(&vertices, &shader, &mut self.framebuffer, depth_test);
            }
        }
    }
}

impl GraphicsContext for SoftwareContext {
    fn clear(&mut self, mask: ClearMask) {
        if mask.color {
            self.framebuffer.clear_color(pack(self.clear_color));
        }
        if mask.depth {
            self.framebuffer.clear_depth(self.clear_depth);
        }
    }

    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.matrix_mode = mode;
    }

    fn load_identity(&mut self) {
        *self.current_matrix() = Mat4::identity();
    }

    fn translate(&mut self, x: f32, y: f32, z: f32) {
        let m = self.current_matrix();
        *m = m.translate(x, y, z);
    }

    fn perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        let m = self.current_matrix();
        *m = *m * Mat4::perspective_rh(fov_y.to_radians(), aspect, near, far);
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.viewport = Viewport {
            x,
            y,
            width,
            height,
        };
    }

    fn begin(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Triangles => self.batch = Some(Vec::new()),
        }
    }

    fn color(&mut self, r: f32, g: f32, b: f32) {
        self.current_color = [r, g, b];
    }

    fn vertex(&mut self, x: f32, y: f32, z: f32) {
        let position = self.projection * self.model_view * Vec4::point(Vec3::new(x, y, z));
        let color = self.current_color;
        match self.batch.as_mut() {
            Some(batch) => batch.push(ClipVertex { position, color }),
            None => log::trace!("vertex outside begin/end ignored"),
        }
    }

    fn end(&mut self) {
        let Some(batch) = self.batch.take() else {
            return;
        };
        for triangle in batch.chunks_exact(3) {
            self.draw_triangle(triangle);
        }
    }

    fn shade_model(&mut self, model: ShadeModel) {
        self.shade_model = model;
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.clear_color = [r, g, b, a];
    }

    fn clear_depth(&mut self, depth: f32) {
        self.clear_depth = depth.clamp(0.0, 1.0);
    }

    fn enable(&mut self, capability: Capability) {
        match capability {
            Capability::DepthTest => self.depth_test = true,
        }
    }

    fn depth_func(&mut self, func: DepthFunc) {
        self.depth_func = func;
    }

    fn hint(&mut self, hint: Hint) {
        match hint {
            Hint::PerspectiveCorrection(mode) => self.perspective_hint = mode,
        }
    }
}
