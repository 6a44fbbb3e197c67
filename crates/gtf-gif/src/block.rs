//! Top-level blocks
//!
//! Every block after the screen descriptor starts with an introducer
//! byte. [`Block::read`] decodes exactly one block; the decoder loops
//! until it sees [`Block::Trailer`].

use crate::color::ColorTable;
use crate::document::LoopCount;
use crate::error::{Result, StreamFault};
use crate::frame::{DisposalMethod, GraphicControl, RawFrame, Rect};
use crate::reader::ByteReader;

const EXTENSION: u8 = 0x21;
const IMAGE_DESCRIPTOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

const GRAPHIC_CONTROL: u8 = 0xF9;
const COMMENT: u8 = 0xFE;
const APPLICATION: u8 = 0xFF;

/// Application identifiers carrying a loop count
const LOOP_IDENTIFIERS: [&[u8]; 2] = [b"NETSCAPE", b"ANIMEXTS"];

/// One decoded top-level block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    GraphicControl(GraphicControl),
    Application { identifier: Vec<u8>, payload: Vec<u8> },
    Comment(Vec<u8>),
    /// Any other extension, consumed without interpretation
    Skipped { label: u8 },
    Image(RawFrame),
    Trailer,
}

impl Block {
    /// Read the next block from the stream
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u8()?;
        match id {
            EXTENSION => Self::read_extension(reader),
            IMAGE_DESCRIPTOR => Ok(Self::Image(read_image(reader)?)),
            TRAILER => Ok(Self::Trailer),
            other => Err(StreamFault::UnknownBlock(other).into()),
        }
    }

    fn read_extension(reader: &mut ByteReader<'_>) -> Result<Self> {
        let label = reader.read_u8()?;
        match label {
            GRAPHIC_CONTROL => {
                // Block size, always 4
                reader.skip(1)?;
                let packed = reader.read_u8()?;
                let delay_cs = reader.read_u16_le()?;
                let transparent = reader.read_u8()?;
                // Block terminator
                reader.skip(1)?;

                Ok(Self::GraphicControl(GraphicControl {
                    disposal: DisposalMethod::from_code((packed >> 2) & 0x07),
                    delay_ms: delay_cs as u32 * 10,
                    transparent_index: (packed & 0x01 != 0).then_some(transparent),
                }))
            }
            APPLICATION => {
                let size = reader.read_u8()? as usize;
                let identifier = reader.read_bytes(size)?.to_vec();
                let payload = reader.read_sub_blocks()?;
                Ok(Self::Application { identifier, payload })
            }
            COMMENT => Ok(Self::Comment(reader.read_sub_blocks()?)),
            other => {
                reader.skip_sub_blocks()?;
                Ok(Self::Skipped { label: other })
            }
        }
    }

    /// Loop count announced by an application extension, if any
    pub fn loop_count(&self) -> Option<LoopCount> {
        let Self::Application { identifier, payload } = self else {
            return None;
        };
        if !LOOP_IDENTIFIERS.iter().any(|id| identifier.starts_with(id)) || payload.len() < 3 {
            return None;
        }

        match u16::from_le_bytes([payload[1], payload[2]]) {
            0 => Some(LoopCount::Infinite),
            n => Some(LoopCount::Finite(n)),
        }
    }
}

fn read_image(reader: &mut ByteReader<'_>) -> Result<RawFrame> {
    let left = reader.read_u16_le()?;
    let top = reader.read_u16_le()?;
    let width = reader.read_u16_le()?;
    let height = reader.read_u16_le()?;
    let packed = reader.read_u8()?;

    let has_local_table = packed & 0x80 != 0;
    let interlaced = packed & 0x40 != 0;

    let local_color_table = if has_local_table {
        Some(ColorTable::read(reader, ColorTable::size_from_bits(packed))?)
    } else {
        None
    };

    let min_code_size = reader.read_u8()?;
    let data = reader.read_sub_blocks()?;

    Ok(RawFrame {
        bounds: Rect::new(left, top, width, height),
        local_color_table,
        interlaced,
        min_code_size,
        data,
    })
}
