//! Byte Reader
//!
//! Forward-only cursor over an in-memory GIF buffer.

use crate::error::StreamFault;

/// Sequential reader over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, StreamFault> {
        let byte = self.read_bytes(1)?;
        Ok(byte[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, StreamFault> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Borrow the next `n` bytes and advance past them
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], StreamFault> {
        let end = self.check(n)?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), StreamFault> {
        self.pos = self.check(n)?;
        Ok(())
    }

    /// Read a sequence of size-prefixed sub-blocks up to the zero-length
    /// terminator and concatenate their payloads
    pub fn read_sub_blocks(&mut self) -> Result<Vec<u8>, StreamFault> {
        let mut payload = Vec::new();
        loop {
            let size = self.read_u8()? as usize;
            if size == 0 {
                return Ok(payload);
            }
            payload.extend_from_slice(self.read_bytes(size)?);
        }
    }

    /// Consume a sub-block sequence without keeping its payload
    pub fn skip_sub_blocks(&mut self) -> Result<(), StreamFault> {
        loop {
            let size = self.read_u8()? as usize;
            if size == 0 {
                return Ok(());
            }
            self.skip(size)?;
        }
    }

    fn check(&self, wanted: usize) -> Result<usize, StreamFault> {
        match self.pos.checked_add(wanted) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(StreamFault::OutOfBounds {
                offset: self.pos,
                wanted,
                len: self.data.len(),
            }),
        }
    }
}
