//! Decoding errors
//!
//! Structural problems abort the whole decode. Per-frame problems are
//! [`FrameIssue`]s: recorded on the frame in lenient mode, raised as
//! [`GifError::Frame`] in strict mode.

/// GIF decoding error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GifError {
    #[error("Unsupported format: signature {signature:?}")]
    UnsupportedFormat { signature: String },

    #[error("Malformed stream: {0}")]
    MalformedStream(#[from] StreamFault),

    #[error("Frame {frame} has neither a local nor a global color table")]
    MissingColorTable { frame: usize },

    #[error("Frame {frame}: {issue}")]
    Frame { frame: usize, issue: FrameIssue },
}

/// Reason a stream could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamFault {
    #[error("unknown block id 0x{0:02X}")]
    UnknownBlock(u8),

    #[error("read of {wanted} bytes at offset {offset} runs past the end ({len} bytes)")]
    OutOfBounds { offset: usize, wanted: usize, len: usize },
}

/// A recoverable problem found while decoding a single frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameIssue {
    #[error("decompression underrun: {produced} of {expected} pixels decoded")]
    DecompressionUnderrun { expected: usize, produced: usize },

    #[error("invalid LZW code {code} after {position} pixels")]
    InvalidCode { code: u16, position: usize },

    #[error("invalid LZW minimum code size {0}")]
    InvalidMinCodeSize(u8),

    #[error("palette index {index} outside {table_len}-entry table ({count} pixels)")]
    PaletteIndexOutOfRange { index: u8, table_len: usize, count: usize },

    #[error("transparent index {index} outside {table_len}-entry table")]
    TransparentIndexOutOfRange { index: u8, table_len: usize },
}

pub type Result<T> = std::result::Result<T, GifError>;
