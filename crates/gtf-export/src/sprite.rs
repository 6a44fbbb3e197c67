//! Sprite sheet (atlas) builder
//!
//! Packs composited frames row by row into one grid raster and records
//! where each frame landed.

use std::fmt;

use gtf_gif::{Color, CompositedFrame};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Fill behind and between sprite cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteBackground {
    #[default]
    Transparent,
    Solid(Color),
}

impl SpriteBackground {
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0; 4],
            Self::Solid(color) => color.to_array(),
        }
    }
}

impl fmt::Display for SpriteBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Solid(color) => f.write_str(&color.to_hex()),
        }
    }
}

/// Sprite sheet layout
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteOptions {
    /// Cells per row; `None` puts every frame on one row
    pub columns: Option<usize>,
    /// Gap between cells in pixels
    pub spacing: u32,
    pub background: SpriteBackground,
}

/// Placement of one frame in the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteFrame {
    pub index: usize,
    pub delay: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteMetadata {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: usize,
    pub rows: usize,
    pub total_frames: usize,
    pub spacing: u32,
    pub background: String,
    pub frames: Vec<SpriteFrame>,
}

impl SpriteMetadata {
    /// Sum of all frame delays in milliseconds
    pub fn total_delay_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay as u64).sum()
    }
}

/// Grid raster plus its layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub metadata: SpriteMetadata,
}

/// Build a sheet from `frames`, or `None` when there are no frames
pub fn build_sprite_sheet(frames: &[CompositedFrame], options: &SpriteOptions) -> Result<Option<SpriteSheet>> {
    let Some(first) = frames.first() else {
        return Ok(None);
    };
    let frame_width = first.width as u32;
    let frame_height = first.height as u32;
    let total = frames.len();

    let cols = options.columns.unwrap_or(total).clamp(1, total);
    let rows = total.div_ceil(cols);
    let spacing = options.spacing;

    let too_large = || ExportError::SheetTooLarge { columns: cols, rows };
    let width = sheet_extent(cols, frame_width, spacing).ok_or_else(too_large)?;
    let height = sheet_extent(rows, frame_height, spacing).ok_or_else(too_large)?;
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .filter(|n| n.checked_mul(4).is_some())
        .ok_or_else(too_large)?;
    // Only multiplied for later cells, which fit inside the checked extent
    let step_x = frame_width.saturating_add(spacing);
    let step_y = frame_height.saturating_add(spacing);

    let mut rgba = options.background.to_rgba().repeat(pixels);
    let stride = width as usize * 4;
    let cell_stride = frame_width as usize * 4;
    let mut placements = Vec::with_capacity(total);

    for (i, frame) in frames.iter().enumerate() {
        let x = (i % cols) as u32 * step_x;
        let y = (i / cols) as u32 * step_y;

        if cell_stride > 0 {
            for (row, src) in frame.rgba.chunks_exact(cell_stride).take(frame_height as usize).enumerate() {
                let start = (y as usize + row) * stride + x as usize * 4;
                rgba[start..start + cell_stride].copy_from_slice(src);
            }
        }

        placements.push(SpriteFrame {
            index: frame.index,
            delay: frame.delay_ms,
            x,
            y,
            width: frame_width,
            height: frame_height,
        });
    }

    tracing::debug!(
        "Sprite sheet {}x{} ({} columns, {} rows)",
        width,
        height,
        cols,
        rows
    );

    Ok(Some(SpriteSheet {
        width,
        height,
        rgba,
        metadata: SpriteMetadata {
            frame_width,
            frame_height,
            columns: cols,
            rows,
            total_frames: total,
            spacing,
            background: options.background.to_string(),
            frames: placements,
        },
    }))
}

/// `cells * cell + spacing * (cells - 1)`, `None` on overflow
fn sheet_extent(cells: usize, cell: u32, spacing: u32) -> Option<u32> {
    let cells = u32::try_from(cells).ok()?;
    cells
        .checked_mul(cell)?
        .checked_add(spacing.checked_mul(cells - 1)?)
}
