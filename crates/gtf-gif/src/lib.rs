//! giftoframes GIF
//!
//! In-memory GIF decoder and frame compositor.
//!
//! Features:
//! - GIF87a / GIF89a header and logical screen parsing
//! - Variable-width LZW decompression with a fixed 4096-entry table
//! - 4-pass de-interlacing
//! - Graphic control, loop count and comment extensions
//! - Disposal-aware compositing into full-screen RGBA rasters
//! - Lenient decoding with per-frame issue reporting, or strict mode
//!
//! ```no_run
//! let bytes = std::fs::read("animation.gif").unwrap();
//! let doc = gtf_gif::decode(&bytes).unwrap();
//! for frame in gtf_gif::CompositedFrames::new(&doc) {
//!     println!("frame {} ({} ms)", frame.index, frame.delay_ms);
//! }
//! ```

pub mod block;
pub mod color;
pub mod compositor;
pub mod decoder;
pub mod document;
pub mod error;
pub mod frame;
pub mod interlace;
pub mod lzw;
pub mod palette;
pub mod reader;
pub mod screen;

#[cfg(test)]
mod test_utils;

pub use color::{Color, ColorTable};
pub use compositor::{compose, CompositedFrame, CompositedFrames, Compositor};
pub use decoder::{decode, DecodeOptions, Decoder, DEFAULT_DELAY_MS};
pub use document::{AnimationDocument, LoopCount};
pub use error::{FrameIssue, GifError, Result, StreamFault};
pub use frame::{DecodedFrame, DisposalMethod, GraphicControl, RawFrame, Rect};
pub use screen::LogicalScreen;
