//! Color and depth storage for the software context.
//!
//! Colors are packed ARGB8888 (`0xAARRGGBB`), the layout SDL's streaming
//! texture expects. The depth buffer is optional: a window opened with zero
//! depth bits has none, and depth testing then always passes.

use image::{Rgba, RgbaImage};

use crate::graphics::DepthFunc;

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Option<Vec<f32>>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, with_depth: bool) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![0; size],
            depth_buffer: with_depth.then(|| vec![1.0; size]),
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height, self.depth_buffer.is_some());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear_color(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    pub fn clear_depth(&mut self, depth: f32) {
        if let Some(depth_buffer) = self.depth_buffer.as_mut() {
            depth_buffer.fill(depth);
        }
    }

    /// Writes a fragment, optionally depth tested against the stored value.
    ///
    /// With `depth_test` set and a depth buffer present, the fragment is kept
    /// only if `func` passes, and the stored depth is updated. Out-of-bounds
    /// coordinates are ignored.
    #[inline]
    pub fn write_fragment(
        &mut self,
        x: i32,
        y: i32,
        depth: f32,
        color: u32,
        depth_test: Option<DepthFunc>,
    ) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;

        if let (Some(func), Some(depth_buffer)) = (depth_test, self.depth_buffer.as_mut()) {
            if !func.passes(depth, depth_buffer[idx]) {
                return;
            }
            depth_buffer[idx] = depth;
        }
        self.color_buffer[idx] = color;
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // slice covers exactly the buffer's bytes and borrows self.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.color_buffer[(y * self.width + x) as usize];
            Rgba(unpack(argb))
        })
    }
}

/// Packs normalized RGBA into ARGB8888.
pub fn pack([r, g, b, a]: [f32; 4]) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    channel(a) << 24 | channel(r) << 16 | channel(g) << 8 | channel(b)
}

/// Splits ARGB8888 into `[r, g, b, a]` bytes.
pub fn unpack(argb: u32) -> [u8; 4] {
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}
