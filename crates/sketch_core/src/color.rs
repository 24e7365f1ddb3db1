//! RGBA colour accepted by every sketch geometry.
//!
//! Components are linear `f32` in 0.0 – 1.0. Callers rarely build a `Color`
//! by hand; the drawing API takes `impl Into<Color>`:
//!
//! ```rust
//! use sketch_core::Color;
//!
//! let red:   Color = [1.0f32, 0.0, 0.0].into();     // float triple
//! let glass: Color = [0.2f32, 0.8, 1.0, 0.4].into(); // float quad
//! let teal:  Color = [0u8, 128, 128].into();        // 8-bit triple
//! let grey:  Color = 0.5f32.into();                  // greyscale shorthand
//! let sky = Color::named("sky blue").unwrap();      // named colour
//! let coral: Color = "#FF6B6B".parse().unwrap();    // hex string
//! # let _ = (red, glass, teal, grey, sky, coral);
//! ```

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A string that is neither a known colour name nor `#RRGGBB[AA]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colour `{0}`")]
pub struct ParseColorError(pub String);

/// Names understood by [`Color::named`], as 8-bit sRGB-style triples.
#[rustfmt::skip]
const NAMED: &[(&str, [u8; 4])] = &[
    ("white",       [255, 255, 255, 255]),
    ("black",       [0,   0,   0,   255]),
    ("transparent", [0,   0,   0,   0]),
    ("red",         [255, 0,   0,   255]),
    ("green",       [0,   255, 0,   255]),
    ("blue",        [0,   0,   255, 255]),
    ("yellow",      [255, 255, 0,   255]),
    ("cyan",        [0,   255, 255, 255]),
    ("aqua",        [0,   255, 255, 255]),
    ("magenta",     [255, 0,   255, 255]),
    ("orange",      [255, 165, 0,   255]),
    ("purple",      [128, 0,   128, 255]),
    ("pink",        [255, 192, 203, 255]),
    ("gray",        [128, 128, 128, 255]),
    ("dark_gray",   [64,  64,  64,  255]),
    ("light_gray",  [211, 211, 211, 255]),
    ("sky_blue",    [135, 206, 235, 255]),
    ("teal",        [0,   128, 128, 255]),
    ("navy",        [0,   0,   128, 255]),
    ("brown",       [165, 42,  42,  255]),
];

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey, all three channels set to `v`.
    pub const fn grey(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let [r, g, b, a] = [r, g, b, a].map(|c| f32::from(c) / 255.0);
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, u8::MAX)
    }

    /// Packed `0xRRGGBBAA`.
    pub fn from_hex(hex: u32) -> Self {
        let [r, g, b, a] = hex.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Looks up a colour name. Case, spaces and dashes are ignored
    /// (`"Sky Blue"`, `"sky-blue"`, `"SKY_BLUE"`), and `grey` spellings are
    /// accepted for `gray`.
    pub fn named(name: &str) -> Option<Self> {
        let key = name
            .trim()
            .to_ascii_lowercase()
            .replace([' ', '-'], "_")
            .replace("grey", "gray");
        NAMED
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, [r, g, b, a])| Self::from_rgba8(*r, *g, *b, *a))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// A colour name or `#RRGGBB` / `#RRGGBBAA`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let Some(digits) = s.trim().strip_prefix('#') else {
            return Self::named(s).ok_or_else(err);
        };
        let value = u32::from_str_radix(digits, 16).map_err(|_| err())?;
        match digits.len() {
            6 => Ok(Self::from_hex(value << 8 | 0xFF)),
            8 => Ok(Self::from_hex(value)),
            _ => Err(err()),
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba8(r, g, b, a)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb8(r, g, b)
    }
}

impl From<f32> for Color {
    fn from(v: f32) -> Self {
        Self::grey(v)
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}
