//! Frame data model

use crate::color::ColorTable;
use crate::error::FrameIssue;

/// How a frame's region is treated before the next frame is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisposalMethod {
    /// 0: no disposal specified
    #[default]
    Unspecified,
    /// 1: leave the frame in place
    Keep,
    /// 2: clear the frame's rectangle to the background
    RestoreBackground,
    /// 3: restore the canvas as it was before the frame was drawn
    RestorePrevious,
    /// 4-7: undefined by the format, treated like [`DisposalMethod::Unspecified`]
    Reserved(u8),
}

impl DisposalMethod {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Unspecified,
            1 => Self::Keep,
            2 => Self::RestoreBackground,
            3 => Self::RestorePrevious,
            other => Self::Reserved(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Keep => 1,
            Self::RestoreBackground => 2,
            Self::RestorePrevious => 3,
            Self::Reserved(code) => code,
        }
    }
}

/// Rectangle on the logical screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self { left, top, width, height }
    }

    /// Rectangle covering a whole `width`x`height` screen
    pub fn full(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the point lies inside the rectangle
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let (left, top) = (self.left as usize, self.top as usize);
        x >= left && x < left + self.width as usize && y >= top && y < top + self.height as usize
    }
}

/// Pending state from a graphic control extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicControl {
    pub disposal: DisposalMethod,
    /// Delay in milliseconds (the stored hundredths scaled by 10)
    pub delay_ms: u32,
    pub transparent_index: Option<u8>,
}

impl GraphicControl {
    /// State applied to an image block that has no extension of its own
    pub fn with_delay(delay_ms: u32) -> Self {
        Self {
            disposal: DisposalMethod::Unspecified,
            delay_ms,
            transparent_index: None,
        }
    }
}

/// An image block as read from the stream, before decompression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub bounds: Rect,
    pub local_color_table: Option<ColorTable>,
    pub interlaced: bool,
    pub min_code_size: u8,
    /// Concatenated LZW sub-block payload
    pub data: Vec<u8>,
}

/// A frame with its resolved pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub raw: RawFrame,
    /// Row-major RGBA, `width * height * 4` bytes unless decompression underran
    pub rgba: Vec<u8>,
    pub delay_ms: u32,
    pub disposal: DisposalMethod,
    pub transparent_index: Option<u8>,
    /// Lenient fallbacks applied while decoding this frame
    pub issues: Vec<FrameIssue>,
}

impl DecodedFrame {
    pub fn bounds(&self) -> Rect {
        self.raw.bounds
    }

    /// Number of pixels actually present in the raster
    pub fn pixel_count(&self) -> usize {
        self.rgba.len() / 4
    }

    /// Whether every pixel of the frame rectangle was decoded. Interlaced
    /// frames that ran short are padded to full size, so the raster length
    /// alone is not enough.
    pub fn is_complete(&self) -> bool {
        self.pixel_count() >= self.raw.bounds.area()
            && !self
                .issues
                .iter()
                .any(|issue| matches!(issue, FrameIssue::DecompressionUnderrun { .. }))
    }
}
