//! Block Dispatcher
//!
//! Drives the block loop: extensions update pending state, image blocks
//! are decompressed, de-interlaced and resolved into [`DecodedFrame`]s.

use crate::block::Block;
use crate::document::{AnimationDocument, LoopCount};
use crate::error::{FrameIssue, GifError, Result};
use crate::frame::{DecodedFrame, GraphicControl, RawFrame};
use crate::interlace::deinterlace;
use crate::lzw;
use crate::palette;
use crate::reader::ByteReader;
use crate::screen::LogicalScreen;

/// Delay given to frames without a usable graphic control delay
pub const DEFAULT_DELAY_MS: u32 = 10;

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Abort on the first [`FrameIssue`] instead of applying the lenient
    /// fallback
    pub strict: bool,

    /// Delay for frames with no graphic control extension or a zero delay
    pub default_delay_ms: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            default_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// GIF decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a complete GIF held in memory
    pub fn decode(&self, data: &[u8]) -> Result<AnimationDocument> {
        let mut reader = ByteReader::new(data);
        let screen = LogicalScreen::parse(&mut reader)?;

        let mut loop_count = LoopCount::Infinite;
        let mut comments = Vec::new();
        let mut frames = Vec::new();
        let mut pending = self.default_control();

        loop {
            let offset = reader.position();
            match Block::read(&mut reader)? {
                Block::GraphicControl(control) => pending = control,
                block @ Block::Application { .. } => {
                    if let Some(count) = block.loop_count() {
                        loop_count = count;
                    }
                }
                Block::Comment(text) => comments.push(String::from_utf8_lossy(&text).into_owned()),
                Block::Skipped { label } => {
                    tracing::debug!("Skipped extension 0x{:02X} at offset {}", label, offset);
                }
                Block::Image(raw) => {
                    let frame = self.decode_frame(&screen, raw, pending, frames.len())?;
                    frames.push(frame);
                    pending = self.default_control();
                }
                Block::Trailer => break,
            }
        }

        tracing::info!(
            "Decoded GIF {}x{}: {} frames, loop {:?}",
            screen.width,
            screen.height,
            frames.len(),
            loop_count
        );

        let background_color = screen.background_color();
        Ok(AnimationDocument {
            screen,
            loop_count,
            background_color,
            frames,
            comments,
        })
    }

    /// Turn one image block into a frame using the pending control state
    pub fn decode_frame(
        &self,
        screen: &LogicalScreen,
        raw: RawFrame,
        control: GraphicControl,
        index: usize,
    ) -> Result<DecodedFrame> {
        let table = raw
            .local_color_table
            .as_ref()
            .or(screen.global_color_table.as_ref())
            .ok_or(GifError::MissingColorTable { frame: index })?;

        let bounds = raw.bounds;
        let expected = bounds.area();
        tracing::debug!(
            "Frame {} at {:?}, code size {}, {} compressed bytes",
            index,
            bounds,
            raw.min_code_size,
            raw.data.len()
        );

        let mut issues = Vec::new();
        let indices = match lzw::decompress(raw.min_code_size, &raw.data, expected) {
            Ok(out) => {
                issues.extend(out.fault);
                out.indices
            }
            Err(issue) => {
                issues.push(issue);
                Vec::new()
            }
        };
        if indices.len() < expected {
            issues.push(FrameIssue::DecompressionUnderrun {
                expected,
                produced: indices.len(),
            });
        }

        let transparent = control.transparent_index;
        let (width, height) = (bounds.width as usize, bounds.height as usize);
        let resolved = if !raw.interlaced {
            palette::resolve(&indices, table, transparent)
        } else if indices.len() == expected {
            palette::resolve(&deinterlace(&indices, width, height), table, transparent)
        } else {
            // Rows that never arrived stay fully transparent
            let mut resolved = palette::resolve(&indices, table, transparent);
            resolved.rgba = deinterlace(&resolved.rgba, width * 4, height);
            resolved
        };
        issues.extend(resolved.issues);

        for issue in &issues {
            if self.options.strict {
                return Err(GifError::Frame { frame: index, issue: issue.clone() });
            }
            tracing::warn!("Frame {}: {}", index, issue);
        }

        let delay_ms = match control.delay_ms {
            0 => self.options.default_delay_ms,
            ms => ms,
        };

        Ok(DecodedFrame {
            raw,
            rgba: resolved.rgba,
            delay_ms,
            disposal: control.disposal,
            transparent_index: transparent,
            issues,
        })
    }

    fn default_control(&self) -> GraphicControl {
        GraphicControl::with_delay(self.options.default_delay_ms)
    }
}

/// Decode with default (lenient) options
pub fn decode(data: &[u8]) -> Result<AnimationDocument> {
    Decoder::default().decode(data)
}
