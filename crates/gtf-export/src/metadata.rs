//! Animation metadata document

use gtf_gif::{AnimationDocument, CompositedFrame, LoopCount, Rect};
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::sprite::SpriteMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameBounds {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for FrameBounds {
    fn from(rect: Rect) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEntry {
    pub index: usize,
    pub delay: u32,
    pub disposal_method: u8,
    pub bounds: FrameBounds,
}

/// Dimensions, timing and per-frame layout of an animation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub width: u16,
    pub height: u16,
    #[serde(serialize_with = "serialize_loop_count")]
    pub loop_count: LoopCount,
    pub total_duration: u64,
    pub frames: Vec<FrameEntry>,
    pub sprite_sheet: Option<SpriteMetadata>,
}

impl Metadata {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_loop_count<S: Serializer>(count: &LoopCount, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match count {
        LoopCount::Infinite => serializer.serialize_str("infinite"),
        LoopCount::Finite(n) => serializer.serialize_u16(*n),
    }
}

pub fn build_metadata(
    doc: &AnimationDocument,
    frames: &[CompositedFrame],
    sprite: Option<&SpriteMetadata>,
) -> Metadata {
    Metadata {
        width: doc.width(),
        height: doc.height(),
        loop_count: doc.loop_count,
        total_duration: frames.iter().map(|f| f.delay_ms as u64).sum(),
        frames: frames
            .iter()
            .map(|f| FrameEntry {
                index: f.index,
                delay: f.delay_ms,
                disposal_method: f.disposal.code(),
                bounds: f.bounds.into(),
            })
            .collect(),
        sprite_sheet: sprite.cloned(),
    }
}
