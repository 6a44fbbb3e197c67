//! POSIX ustar archive builder
//!
//! Regular files only. Every entry is a 512-byte header followed by the
//! payload padded to a 512-byte boundary; the archive ends with two
//! zero-filled blocks. Names longer than the 100-byte name field are
//! split at a `/` into the 155-byte prefix field.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ExportError, Result};

pub const BLOCK_SIZE: usize = 512;

/// Width of the header name field
pub const NAME_LEN: usize = 100;
const PREFIX_LEN: usize = 155;
const OWNER: &str = "giftoframes";

/// In-memory tar writer
#[derive(Debug, Clone)]
pub struct TarBuilder {
    buffer: Vec<u8>,
    mtime: u64,
    entries: usize,
}

impl Default for TarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TarBuilder {
    /// Builder stamping entries with the current time
    pub fn new() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::with_mtime(now)
    }

    /// Builder stamping entries with a fixed modification time
    pub fn with_mtime(mtime: u64) -> Self {
        Self {
            buffer: Vec::new(),
            mtime,
            entries: 0,
        }
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Append a regular file
    pub fn append(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let Some((prefix, name)) = split_name(name) else {
            return Err(ExportError::EntryName(name.to_string()));
        };

        let header = header(prefix, name, data.len() as u64, self.mtime);
        self.buffer.extend_from_slice(&header);
        self.buffer.extend_from_slice(data);
        let remainder = data.len() % BLOCK_SIZE;
        if remainder != 0 {
            self.buffer.resize(self.buffer.len() + BLOCK_SIZE - remainder, 0);
        }
        self.entries += 1;
        Ok(())
    }

    /// Terminate the archive and return its bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.resize(self.buffer.len() + 2 * BLOCK_SIZE, 0);
        tracing::debug!("Tar archive: {} entries, {} bytes", self.entries, self.buffer.len());
        self.buffer
    }
}

/// Split `path` into the ustar (prefix, name) pair, `None` if it cannot fit
fn split_name(path: &str) -> Option<(&str, &str)> {
    if path.is_empty() {
        return None;
    }
    if path.len() <= NAME_LEN {
        return Some(("", path));
    }
    // The prefix is rejoined with a '/', so split on one
    path.match_indices('/')
        .map(|(i, _)| (&path[..i], &path[i + 1..]))
        .find(|(prefix, name)| prefix.len() <= PREFIX_LEN && !name.is_empty() && name.len() <= NAME_LEN)
}

/// Longest prefix of `value` within `max` bytes that ends on a char boundary
pub fn truncate_to_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

fn header(prefix: &str, name: &str, size: u64, mtime: u64) -> [u8; BLOCK_SIZE] {
    let mut header = [0u8; BLOCK_SIZE];
    write_str(&mut header, 0, NAME_LEN, name);
    write_octal(&mut header, 100, 8, 0o644);
    write_octal(&mut header, 108, 8, 0);
    write_octal(&mut header, 116, 8, 0);
    write_octal(&mut header, 124, 12, size);
    write_octal(&mut header, 136, 12, mtime);
    // Checksum is computed with its own field filled with spaces
    header[148..156].fill(b' ');
    header[156] = b'0';
    write_str(&mut header, 257, 6, "ustar");
    header[263..265].copy_from_slice(b"00");
    write_str(&mut header, 265, 32, OWNER);
    write_str(&mut header, 297, 32, OWNER);
    write_octal(&mut header, 329, 8, 0);
    write_octal(&mut header, 337, 8, 0);
    write_str(&mut header, 345, PREFIX_LEN, prefix);

    let checksum: u64 = header.iter().map(|&b| b as u64).sum();
    write_octal(&mut header, 148, 7, checksum);
    header[155] = b' ';
    header
}

fn write_str(header: &mut [u8], offset: usize, len: usize, value: &str) {
    let bytes = value.as_bytes();
    let n = bytes.len().min(len);
    header[offset..offset + n].copy_from_slice(&bytes[..n]);
}

/// Zero-padded octal digits filling `len - 1` bytes, then a NUL
fn write_octal(header: &mut [u8], offset: usize, len: usize, value: u64) {
    let digits = format!("{:0width$o}", value, width = len - 1);
    let digits = &digits.as_bytes()[digits.len() - (len - 1)..];
    header[offset..offset + len - 1].copy_from_slice(digits);
    header[offset + len - 1] = 0;
}
