//! Test fixtures: a reference LZW encoder and a GIF byte builder

use std::collections::HashMap;

use crate::color::Color;
use crate::frame::Rect;

/// LSB-first packer of variable-width codes
pub struct CodeWriter {
    bytes: Vec<u8>,
    buffer: u32,
    bits: u8,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self { bytes: Vec::new(), buffer: 0, bits: 0 }
    }

    pub fn write(&mut self, code: u16, width: u8) {
        self.buffer |= ((code as u32) & ((1 << width) - 1)) << self.bits;
        self.bits += width;
        while self.bits >= 8 {
            self.bytes.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        if self.bits > 0 {
            self.bytes.push(self.buffer as u8);
        }
        self.bytes
    }
}

/// Codes (with their widths) for `indices`, without the leading clear or
/// the trailing end code. Emits a clear code whenever the next assignable
/// code reaches `reset_at`; with `None` the table freezes when full.
///
/// Returns the codes and the width a following control code must use.
pub fn lzw_codes_with(indices: &[u8], m: u8, reset_at: Option<usize>) -> (Vec<(u16, u8)>, u8) {
    let clear = 1u16 << m;
    let mut codes = Vec::new();
    let mut table: HashMap<(u16, u8), u16> = HashMap::new();
    let mut next = clear + 2;
    let mut width = m + 1;
    let mut current: Option<u16> = None;

    // Width the decoder expects after adding its (lagging) entry
    let control_width = |next: u16, width: u8| {
        if next == 1 << width && width < 12 { width + 1 } else { width }
    };

    for &k in indices {
        let Some(w) = current else {
            current = Some(k as u16);
            continue;
        };
        if let Some(&code) = table.get(&(w, k)) {
            current = Some(code);
            continue;
        }

        codes.push((w, width));
        if reset_at.is_some_and(|limit| next as usize >= limit) {
            codes.push((clear, control_width(next, width)));
            table.clear();
            next = clear + 2;
            width = m + 1;
        } else if (next as usize) < 4096 {
            table.insert((w, k), next);
            next += 1;
            if next > 1 << width && width < 12 {
                width += 1;
            }
        }
        current = Some(k as u16);
    }

    if let Some(w) = current {
        codes.push((w, width));
    }
    (codes, control_width(next, width))
}

/// Codes for `indices` resetting whenever the table fills
pub fn lzw_codes(indices: &[u8], m: u8) -> (Vec<(u16, u8)>, u8) {
    lzw_codes_with(indices, m, Some(4096))
}

/// Full stream: clear, codes, end
pub fn lzw_encode_with_resets(indices: &[u8], m: u8, reset_at: Option<usize>) -> Vec<u8> {
    let clear = 1u16 << m;
    let mut writer = CodeWriter::new();
    writer.write(clear, m + 1);
    let (codes, width) = lzw_codes_with(indices, m, reset_at);
    for (code, w) in codes {
        writer.write(code, w);
    }
    writer.write(clear + 1, width);
    writer.finish()
}

pub fn lzw_encode(indices: &[u8], m: u8) -> Vec<u8> {
    lzw_encode_with_resets(indices, m, Some(4096))
}

/// Reorder top-to-bottom rows into the 4-pass interlaced storage order
pub fn interlace(indices: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len());
    for (start, step) in [(0, 8), (4, 8), (2, 4), (1, 2)] {
        for row in (start..height).step_by(step) {
            out.extend_from_slice(&indices[row * width..(row + 1) * width]);
        }
    }
    out
}

/// Image block description for [`GifBuilder::image`]
pub struct ImageParams<'a> {
    pub rect: Rect,
    pub indices: &'a [u8],
    pub local_table: Option<&'a [Color]>,
    pub interlaced: bool,
    pub min_code_size: u8,
}

impl<'a> ImageParams<'a> {
    pub fn new(rect: Rect, indices: &'a [u8]) -> Self {
        Self {
            rect,
            indices,
            local_table: None,
            interlaced: false,
            min_code_size: 2,
        }
    }
}

/// Assembles GIF89a byte streams block by block
pub struct GifBuilder {
    bytes: Vec<u8>,
}

impl GifBuilder {
    pub fn new(width: u16, height: u16, global_table: Option<&[Color]>, background_index: u8) -> Self {
        let mut bytes = b"GIF89a".to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        let packed = match global_table {
            Some(colors) => 0x80 | 0x70 | table_bits(colors.len()),
            None => 0x70,
        };
        bytes.extend_from_slice(&[packed, background_index, 0]);
        if let Some(colors) = global_table {
            write_table(&mut bytes, colors);
        }
        Self { bytes }
    }

    pub fn graphic_control(mut self, disposal: u8, delay_cs: u16, transparent: Option<u8>) -> Self {
        let packed = (disposal & 0x07) << 2 | transparent.is_some() as u8;
        self.bytes.extend_from_slice(&[0x21, 0xF9, 4, packed]);
        self.bytes.extend_from_slice(&delay_cs.to_le_bytes());
        self.bytes.extend_from_slice(&[transparent.unwrap_or(0), 0]);
        self
    }

    pub fn application(mut self, identifier: &[u8], payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0xFF, identifier.len() as u8]);
        self.bytes.extend_from_slice(identifier);
        write_sub_blocks(&mut self.bytes, payload);
        self
    }

    pub fn loop_count(self, count: u16) -> Self {
        let [lo, hi] = count.to_le_bytes();
        self.application(b"NETSCAPE2.0", &[1, lo, hi])
    }

    pub fn extension(mut self, label: u8, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0x21, label]);
        write_sub_blocks(&mut self.bytes, payload);
        self
    }

    pub fn image(mut self, params: ImageParams<'_>) -> Self {
        let rect = params.rect;
        self.bytes.push(0x2C);
        for value in [rect.left, rect.top, rect.width, rect.height] {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
        let mut packed = 0u8;
        if let Some(colors) = params.local_table {
            packed |= 0x80 | table_bits(colors.len());
        }
        if params.interlaced {
            packed |= 0x40;
        }
        self.bytes.push(packed);
        if let Some(colors) = params.local_table {
            write_table(&mut self.bytes, colors);
        }

        let stored = if params.interlaced {
            interlace(params.indices, rect.width as usize, rect.height as usize)
        } else {
            params.indices.to_vec()
        };
        self.bytes.push(params.min_code_size);
        let data = lzw_encode(&stored, params.min_code_size);
        write_sub_blocks(&mut self.bytes, &data);
        self
    }

    /// Image block with a literal compressed payload
    pub fn raw_image(mut self, rect: Rect, min_code_size: u8, data: &[u8]) -> Self {
        self.bytes.push(0x2C);
        for value in [rect.left, rect.top, rect.width, rect.height] {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
        self.bytes.extend_from_slice(&[0, min_code_size]);
        write_sub_blocks(&mut self.bytes, data);
        self
    }

    pub fn push(mut self, byte: u8) -> Self {
        self.bytes.push(byte);
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes.push(0x3B);
        self.bytes
    }

    /// Bytes so far, without a trailer
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn table_bits(len: usize) -> u8 {
    let size = len.next_power_of_two().max(2);
    (size.trailing_zeros() - 1) as u8
}

fn write_table(bytes: &mut Vec<u8>, colors: &[Color]) {
    let size = colors.len().next_power_of_two().max(2);
    for i in 0..size {
        let c = colors.get(i).copied().unwrap_or(Color::BLACK);
        bytes.extend_from_slice(&[c.r, c.g, c.b]);
    }
}

fn write_sub_blocks(bytes: &mut Vec<u8>, payload: &[u8]) {
    for chunk in payload.chunks(255) {
        bytes.push(chunk.len() as u8);
        bytes.extend_from_slice(chunk);
    }
    bytes.push(0);
}

/// Four-entry palette used across tests: red, green, blue, white
pub fn rgbw() -> Vec<Color> {
    vec![
        Color::rgb(255, 0, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 0, 255),
        Color::rgb(255, 255, 255),
    ]
}
