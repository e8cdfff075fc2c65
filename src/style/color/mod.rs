use std::fmt;

use glam::Vec4;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::ParseError;

mod hex_color;

pub use hex_color::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

static NAMED_COLORS: Lazy<FxHashMap<&'static str, Color>> = Lazy::new(|| {
    let mut named = FxHashMap::default();
    named.insert("transparent", Color::transparent());
    named.insert("black", Color::rgb(0, 0, 0));
    named.insert("white", Color::rgb(255, 255, 255));
    named.insert("red", Color::rgb(255, 0, 0));
    named.insert("green", Color::rgb(0, 128, 0));
    named.insert("blue", Color::rgb(0, 0, 255));
    named.insert("yellow", Color::rgb(255, 255, 0));
    named.insert("gray", Color::rgb(128, 128, 128));
    named.insert("grey", Color::rgb(128, 128, 128));
    named
});

pub fn parse_color(raw: &str) -> Result<Vec4, ParseError> {
    let trimmed = raw.trim();
    if let Some(color) = parse_hex(trimmed) {
        return Ok(color.to_vec4());
    }
    NAMED_COLORS
        .get(trimmed.to_ascii_lowercase().as_str())
        .map(|color| color.to_vec4())
        .ok_or_else(|| ParseError::InvalidColor(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Color, parse_color};
    use crate::error::ParseError;
    use glam::Vec4;

    #[test]
    fn six_and_eight_digit_red_agree() {
        assert_eq!(parse_color("#ff0000"), Ok(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_color("#ff0000ff"), Ok(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn display_round_trips_through_the_parser() {
        let color = Color::rgba(64, 120, 242, 128);
        assert_eq!(color.to_string(), "#4078f280");
        assert_eq!(parse_color(&color.to_string()), Ok(color.to_vec4()));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(parse_color("White"), Ok(Vec4::ONE));
        assert_eq!(parse_color("transparent"), Ok(Vec4::ZERO));
        assert!(matches!(parse_color("#abc12"), Err(ParseError::InvalidColor(_))));
    }
}
