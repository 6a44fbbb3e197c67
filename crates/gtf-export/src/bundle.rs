//! Export bundle
//!
//! Turns composited frames into the set of named files written for one
//! animation.

use gtf_gif::{AnimationDocument, CompositedFrame};

use crate::css::build_animation_css;
use crate::error::{ExportError, Result};
use crate::metadata::build_metadata;
use crate::raster::encode_png;
use crate::sprite::{build_sprite_sheet, SpriteMetadata, SpriteOptions};
use crate::tar::{truncate_to_boundary, TarBuilder, NAME_LEN};

/// What to produce besides the frame PNGs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub sprite: SpriteOptions,
    /// Sprite sheet PNG plus its CSS
    pub sprite_sheet: bool,
    /// Tar archive of the frame PNGs
    pub archive: bool,
    /// Metadata JSON
    pub metadata: bool,
    /// Archive modification time; `None` uses the current time
    pub mtime: Option<u64>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sprite: SpriteOptions::default(),
            sprite_sheet: true,
            archive: true,
            metadata: true,
            mtime: None,
        }
    }
}

/// A named payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl ExportFile {
    fn new(name: String, data: Vec<u8>) -> Self {
        Self { name, data }
    }
}

/// Every file produced for one animation, in write order
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
    pub sprite: Option<SpriteMetadata>,
}

impl ExportBundle {
    pub fn build(
        doc: &AnimationDocument,
        frames: &[CompositedFrame],
        base_name: &str,
        options: &ExportOptions,
    ) -> Result<Self> {
        if frames.is_empty() {
            return Err(ExportError::EmptyAnimation);
        }

        let mut files = Vec::new();
        for frame in frames {
            let png = encode_png(&frame.rgba, frame.width as u32, frame.height as u32)?;
            files.push(ExportFile::new(frame_file_name(base_name, frame.index), png));
        }

        let mut sprite = None;
        if options.sprite_sheet {
            if let Some(sheet) = build_sprite_sheet(frames, &options.sprite)? {
                let png = encode_png(&sheet.rgba, sheet.width, sheet.height)?;
                files.push(ExportFile::new(format!("{}-spritesheet.png", base_name), png));
                let css = build_animation_css(base_name, &sheet.metadata);
                files.push(ExportFile::new(format!("{}.css", base_name), css.into_bytes()));
                sprite = Some(sheet.metadata);
            }
        }

        if options.metadata {
            let json = build_metadata(doc, frames, sprite.as_ref()).to_json()?;
            files.push(ExportFile::new(format!("{}-frames.json", base_name), json.into_bytes()));
        }

        if options.archive {
            let mut tar = match options.mtime {
                Some(mtime) => TarBuilder::with_mtime(mtime),
                None => TarBuilder::new(),
            };
            for (frame, file) in frames.iter().zip(&files) {
                tar.append(&archive_entry_name(base_name, frame.index), &file.data)?;
            }
            files.push(ExportFile::new(format!("{}-frames.tar", base_name), tar.finish()));
        }

        tracing::info!("Prepared {} export files for {}", files.len(), base_name);
        Ok(Self { files, sprite })
    }

    pub fn get(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

/// `<base>-frame-NNN.png` for a 1-based frame index
pub fn frame_file_name(base_name: &str, index: usize) -> String {
    format!("{}-frame-{:03}.png", base_name, index)
}

/// Frame file name shortened to fit a tar header, cutting the base name
/// so the frame number and extension survive
fn archive_entry_name(base_name: &str, index: usize) -> String {
    let name = frame_file_name(base_name, index);
    if name.len() <= NAME_LEN {
        return name;
    }
    let suffix_len = name.len() - base_name.len();
    let base = truncate_to_boundary(base_name, NAME_LEN.saturating_sub(suffix_len));
    tracing::debug!("Archive entry for frame {} shortened to {} bytes", index, NAME_LEN);
    frame_file_name(base, index)
}
