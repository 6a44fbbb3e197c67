//! Conversion summary

use std::fmt;

use gtf_gif::{AnimationDocument, LoopCount};

/// Headline facts about a decoded animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub source: Option<String>,
    pub width: u16,
    pub height: u16,
    pub frame_count: usize,
    pub total_duration_ms: u64,
    pub loop_count: LoopCount,
    /// Frames decoded with lenient fallbacks
    pub damaged_frames: usize,
}

impl Summary {
    pub fn new(doc: &AnimationDocument, source: Option<String>) -> Self {
        Self {
            source,
            width: doc.width(),
            height: doc.height(),
            frame_count: doc.frames.len(),
            total_duration_ms: doc.total_duration_ms(),
            loop_count: doc.loop_count,
            damaged_frames: doc.frames_with_issues().count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source file: {}", self.source.as_deref().unwrap_or("Untitled"))?;
        writeln!(f, "Dimensions: {} × {}", self.width, self.height)?;
        writeln!(f, "Frame count: {}", self.frame_count)?;
        writeln!(f, "Total duration: {}", format_duration(self.total_duration_ms))?;
        write!(f, "Loop count: {}", format_loop_count(self.loop_count))?;
        if self.damaged_frames > 0 {
            write!(f, "\nDamaged frames: {}", self.damaged_frames)?;
        }
        Ok(())
    }
}

/// `n ms` below a second, `s.ss s` below a minute, `m min s.s s` beyond
pub fn format_duration(ms: u64) -> String {
    let seconds = ms as f64 / 1000.0;
    if ms < 1000 {
        format!("{} ms", ms)
    } else if seconds < 60.0 {
        format!("{:.2} s", seconds)
    } else {
        let minutes = (seconds / 60.0).floor();
        format!("{} min {:.1} s", minutes as u64, seconds - minutes * 60.0)
    }
}

pub fn format_loop_count(count: LoopCount) -> String {
    match count {
        LoopCount::Infinite => "Infinite".to_string(),
        LoopCount::Finite(n) => format!("{} time(s)", n),
    }
}
