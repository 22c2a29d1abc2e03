//! Vertex colors.
//!
//! A [`Color`] is either one of the four named constants or an explicit,
//! non-premultiplied RGBA value backed by [`image::Rgba`].

use std::fmt;

use image::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Transparent,
    Opaque,
    Rgba(Rgba<u8>),
}

impl Color {
    pub const RED: Color = Color::Rgba(Rgba([255, 0, 0, 255]));
    pub const GREEN: Color = Color::Rgba(Rgba([0, 255, 0, 255]));
    pub const BLUE: Color = Color::Rgba(Rgba([0, 0, 255, 255]));

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::Rgba(Rgba([r, g, b, a]))
    }

    /// The channels this color stands for, in `[0, 255]`.
    pub fn channels(self) -> [u8; 4] {
        match self {
            Color::Black => [0, 0, 0, 255],
            Color::White | Color::Opaque => [255, 255, 255, 255],
            Color::Transparent => [0, 0, 0, 0],
            Color::Rgba(Rgba(c)) => c,
        }
    }

    /// RGB components in `[0.0, 1.0]`, as passed to a `color` command.
    pub fn to_rgb_f32(self) -> [f32; 3] {
        let [r, g, b, _] = self.channels();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// The constant's name, or `None` for an explicit RGBA value.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Color::Black => Some("Black"),
            Color::White => Some("White"),
            Color::Transparent => Some("Transparent"),
            Color::Opaque => Some("Opaque"),
            Color::Rgba(_) => None,
        }
    }
}

/// Named constants print their name, explicit values print `[r,g,b,a]`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgba(Rgba([r, g, b, a])) => write!(f, "[{r},{g},{b},{a}]"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Color::Black, "Black")]
    #[test_case(Color::White, "White")]
    #[test_case(Color::Transparent, "Transparent")]
    #[test_case(Color::Opaque, "Opaque")]
    #[test_case(Color::rgba(1, 0, 0, 0), "[1,0,0,0]")]
    #[test_case(Color::RED, "[255,0,0,255]")]
    fn display(color: Color, expected: &str) {
        assert_eq!(color.to_string(), expected);
    }

    #[test]
    fn explicit_black_is_not_the_named_constant() {
        let explicit = Color::rgba(0, 0, 0, 255);
        assert_ne!(explicit, Color::Black);
        assert_eq!(explicit.channels(), Color::Black.channels());
    }

    #[test]
    fn rgb_components_are_normalized() {
        assert_eq!(Color::RED.to_rgb_f32(), [1.0, 0.0, 0.0]);
        assert_eq!(Color::Opaque.to_rgb_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::Transparent.to_rgb_f32(), [0.0, 0.0, 0.0]);
    }
}
