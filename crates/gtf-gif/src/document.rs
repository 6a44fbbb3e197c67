//! Decoded animation

use crate::color::Color;
use crate::frame::DecodedFrame;
use crate::screen::LogicalScreen;

/// How many times the animation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopCount {
    /// Loop forever. Also used when the stream has no loop extension.
    #[default]
    Infinite,
    Finite(u16),
}

impl LoopCount {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

/// Everything the decoder extracts from a GIF stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDocument {
    pub screen: LogicalScreen,
    pub loop_count: LoopCount,
    pub background_color: Color,
    pub frames: Vec<DecodedFrame>,
    /// Comment extensions, in stream order
    pub comments: Vec<String>,
}

impl AnimationDocument {
    pub fn width(&self) -> u16 {
        self.screen.width
    }

    pub fn height(&self) -> u16 {
        self.screen.height
    }

    /// Sum of all frame delays
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay_ms as u64).sum()
    }

    /// Frames that needed at least one lenient fallback
    pub fn frames_with_issues(&self) -> impl Iterator<Item = (usize, &DecodedFrame)> {
        self.frames.iter().enumerate().filter(|(_, f)| !f.issues.is_empty())
    }
}
