//! Colors and color tables

use crate::error::StreamFault;
use crate::reader::ByteReader;

/// Color (RGBA, non-premultiplied)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Ordered palette of opaque colors, 2 to 256 entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Color>,
}

impl ColorTable {
    /// Number of entries encoded by the low three bits of a packed field
    pub fn size_from_bits(bits: u8) -> usize {
        1 << ((bits & 0x07) + 1)
    }

    /// Read `size` RGB triples; alpha is implied opaque
    pub fn read(reader: &mut ByteReader<'_>, size: usize) -> Result<Self, StreamFault> {
        let bytes = reader.read_bytes(size * 3)?;
        let entries = bytes
            .chunks_exact(3)
            .map(|rgb| Color::rgb(rgb[0], rgb[1], rgb[2]))
            .collect();
        Ok(Self { entries })
    }

    pub fn from_colors(entries: Vec<Color>) -> Self {
        Self { entries }
    }

    pub fn get(&self, index: u8) -> Option<Color> {
        self.entries.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.entries
    }
}
