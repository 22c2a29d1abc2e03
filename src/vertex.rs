//! A position in 3-space carrying a color.

use std::fmt;

use crate::color::Color;
use crate::math::vec3::Vec3;

/// Immutable colored vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    position: Vec3,
    color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            color,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Coordinates formatted as `(x,y,z)` with two decimals.
    pub fn coords(&self) -> String {
        let Vec3 { x, y, z } = self.position;
        format!("({x:.2},{y:.2},{z:.2})")
    }

    /// The color's constant name, or its `[r,g,b,a]` channels.
    ///
    /// Channels print as straight 8-bit values, not 16-bit alpha-premultiplied.
    pub fn color_name(&self) -> String {
        self.color.to_string()
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coords(), self.color)
    }
}
