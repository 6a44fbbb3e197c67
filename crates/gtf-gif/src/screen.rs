//! Header and Logical Screen Descriptor

use crate::color::{Color, ColorTable};
use crate::error::{GifError, Result};
use crate::reader::ByteReader;

/// Recognized 6-byte signatures
pub const SIGNATURES: [&[u8; 6]; 2] = [b"GIF87a", b"GIF89a"];

/// Canvas shared by all frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalScreen {
    pub width: u16,
    pub height: u16,
    pub global_color_table: Option<ColorTable>,
    pub background_index: u8,
    /// Bits per primary color, as declared (not used for decoding)
    pub color_resolution: u8,
}

impl LogicalScreen {
    /// Parse the signature, the screen descriptor and the global color table
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let signature = reader.read_bytes(6)?;
        if !SIGNATURES.iter().any(|s| s.as_slice() == signature) {
            return Err(GifError::UnsupportedFormat {
                signature: String::from_utf8_lossy(signature).into_owned(),
            });
        }

        let width = reader.read_u16_le()?;
        let height = reader.read_u16_le()?;
        let packed = reader.read_u8()?;
        let background_index = reader.read_u8()?;
        // Pixel aspect ratio
        reader.skip(1)?;

        let has_global_table = packed & 0x80 != 0;
        let color_resolution = ((packed & 0x70) >> 4) + 1;

        let global_color_table = if has_global_table {
            let size = ColorTable::size_from_bits(packed);
            Some(ColorTable::read(reader, size)?)
        } else {
            None
        };

        tracing::debug!(
            "Logical screen {}x{}, global table: {:?} entries",
            width,
            height,
            global_color_table.as_ref().map(ColorTable::len)
        );

        Ok(Self {
            width,
            height,
            global_color_table,
            background_index,
            color_resolution,
        })
    }

    /// Global table entry at the background index, or transparent black
    pub fn background_color(&self) -> Color {
        self.global_color_table
            .as_ref()
            .and_then(|table| table.get(self.background_index))
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Pixel count of a full-screen raster
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(signature: &[u8], packed: u8, background: u8) -> Vec<u8> {
        let mut data = signature.to_vec();
        data.extend_from_slice(&[3, 0, 2, 0, packed, background, 0]);
        data
    }

    #[test]
    fn test_parse_without_global_table() {
        let data = header(b"GIF87a", 0x70, 0);
        let mut reader = ByteReader::new(&data);
        let screen = LogicalScreen::parse(&mut reader).unwrap();
        assert_eq!((screen.width, screen.height), (3, 2));
        assert_eq!(screen.color_resolution, 8);
        assert!(screen.global_color_table.is_none());
        assert_eq!(screen.background_color(), Color::TRANSPARENT);
        assert_eq!(screen.area(), 6);
    }

    #[test]
    fn test_parse_with_global_table() {
        let mut data = header(b"GIF89a", 0x80, 1);
        data.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
        let mut reader = ByteReader::new(&data);
        let screen = LogicalScreen::parse(&mut reader).unwrap();
        assert_eq!(screen.global_color_table.as_ref().map(ColorTable::len), Some(2));
        assert_eq!(screen.background_color(), Color::rgb(40, 50, 60));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_background_index_outside_table() {
        let mut data = header(b"GIF89a", 0x80, 9);
        data.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
        let screen = LogicalScreen::parse(&mut ByteReader::new(&data)).unwrap();
        assert_eq!(screen.background_color(), Color::TRANSPARENT);
    }

    #[test]
    fn test_bad_signature() {
        let data = header(b"GIF88a", 0, 0);
        let err = LogicalScreen::parse(&mut ByteReader::new(&data)).unwrap_err();
        assert_eq!(err, GifError::UnsupportedFormat { signature: "GIF88a".into() });
    }

    #[test]
    fn test_truncated_global_table() {
        let mut data = header(b"GIF89a", 0x81, 0);
        data.extend_from_slice(&[1, 2, 3]);
        let err = LogicalScreen::parse(&mut ByteReader::new(&data)).unwrap_err();
        assert!(matches!(err, GifError::MalformedStream(_)));
    }
}
