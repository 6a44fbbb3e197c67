//! LZW Decompressor
//!
//! Variable-width (up to 12 bit) GIF flavour of LZW. Codes are packed
//! least-significant-bit first. The string table is a fixed 4096-entry
//! prefix/suffix table; strings are rebuilt by walking prefix links.

use crate::error::FrameIssue;

const MAX_CODES: usize = 4096;
const MAX_CODE_WIDTH: u8 = 12;
/// Largest minimum code size whose symbols still fit a palette index
const MAX_MIN_CODE_SIZE: u8 = 8;
const NO_PREFIX: u16 = u16::MAX;

/// Result of decompressing one image block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzwOutput {
    /// Palette indices, at most the expected pixel count
    pub indices: Vec<u8>,
    /// Set when decoding stopped on a code that was neither in the table
    /// nor the next assignable one
    pub fault: Option<FrameIssue>,
}

/// Per-block LZW decoder
pub struct LzwDecoder {
    min_code_size: u8,
    clear_code: u16,
    end_code: u16,

    code_width: u8,
    next_code: u16,

    prefix: [u16; MAX_CODES],
    suffix: [u8; MAX_CODES],
    first: [u8; MAX_CODES],

    stack: Vec<u8>,
}

impl LzwDecoder {
    /// Create a decoder for the given minimum code size (1..=8)
    pub fn new(min_code_size: u8) -> Result<Self, FrameIssue> {
        if !(1..=MAX_MIN_CODE_SIZE).contains(&min_code_size) {
            return Err(FrameIssue::InvalidMinCodeSize(min_code_size));
        }

        let clear_code = 1u16 << min_code_size;
        let mut decoder = Self {
            min_code_size,
            clear_code,
            end_code: clear_code + 1,
            code_width: min_code_size + 1,
            next_code: clear_code + 2,
            prefix: [NO_PREFIX; MAX_CODES],
            suffix: [0; MAX_CODES],
            first: [0; MAX_CODES],
            stack: Vec::with_capacity(MAX_CODES),
        };
        decoder.reset();
        Ok(decoder)
    }

    /// Current code width in bits
    pub fn code_width(&self) -> u8 {
        self.code_width
    }

    /// Number of table slots in use, including the clear and end codes
    pub fn table_len(&self) -> usize {
        self.next_code as usize
    }

    fn reset(&mut self) {
        self.code_width = self.min_code_size + 1;
        self.next_code = self.end_code + 1;
        for symbol in 0..self.clear_code {
            let i = symbol as usize;
            self.prefix[i] = NO_PREFIX;
            self.suffix[i] = symbol as u8;
            self.first[i] = symbol as u8;
        }
    }

    /// Decompress `data`, producing at most `expected` indices.
    ///
    /// Stops at the end code, when the input runs out, once `expected`
    /// indices are produced, or on an invalid code. A short result is
    /// returned as-is; the caller decides how to report it.
    pub fn decode(&mut self, data: &[u8], expected: usize) -> LzwOutput {
        self.reset();

        let mut codes = CodeReader::new(data);
        let mut output = Vec::with_capacity(expected);
        let mut prev: Option<u16> = None;
        let mut fault = None;

        while output.len() < expected {
            let Some(code) = codes.read(self.code_width) else {
                break;
            };

            if code == self.clear_code {
                self.reset();
                prev = None;
                continue;
            }
            if code == self.end_code {
                break;
            }

            let first = match prev {
                _ if code < self.next_code => self.first[code as usize],
                // KwKwK: the string is not in the table yet
                Some(p) if code == self.next_code => self.first[p as usize],
                _ => {
                    fault = Some(FrameIssue::InvalidCode { code, position: output.len() });
                    break;
                }
            };

            if let Some(p) = prev {
                self.add_entry(p, first);
            }
            self.emit(code, &mut output, expected);
            prev = Some(code);
        }

        LzwOutput { indices: output, fault }
    }

    fn add_entry(&mut self, prefix: u16, suffix: u8) {
        // A full table stays frozen until the next clear code
        if self.next_code as usize >= MAX_CODES {
            return;
        }

        let slot = self.next_code as usize;
        self.prefix[slot] = prefix;
        self.suffix[slot] = suffix;
        self.first[slot] = self.first[prefix as usize];
        self.next_code += 1;

        if self.next_code == 1 << self.code_width && self.code_width < MAX_CODE_WIDTH {
            self.code_width += 1;
        }
    }

    fn emit(&mut self, code: u16, output: &mut Vec<u8>, expected: usize) {
        self.stack.clear();
        let mut current = code;
        loop {
            self.stack.push(self.suffix[current as usize]);
            match self.prefix[current as usize] {
                NO_PREFIX => break,
                p => current = p,
            }
        }

        let room = expected - output.len();
        output.extend(self.stack.iter().rev().take(room));
    }
}

/// Decompress one image block's payload
pub fn decompress(min_code_size: u8, data: &[u8], expected: usize) -> Result<LzwOutput, FrameIssue> {
    let mut decoder = LzwDecoder::new(min_code_size)?;
    Ok(decoder.decode(data, expected))
}

/// LSB-first reader of variable-width codes
struct CodeReader<'a> {
    data: &'a [u8],
    pos: usize,
    buffer: u32,
    bits: u8,
}

impl<'a> CodeReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            buffer: 0,
            bits: 0,
        }
    }

    fn read(&mut self, width: u8) -> Option<u16> {
        while self.bits < width {
            let byte = *self.data.get(self.pos)?;
            self.buffer |= (byte as u32) << self.bits;
            self.pos += 1;
            self.bits += 8;
        }

        let code = (self.buffer & ((1u32 << width) - 1)) as u16;
        self.buffer >>= width;
        self.bits -= width;
        Some(code)
    }
}
