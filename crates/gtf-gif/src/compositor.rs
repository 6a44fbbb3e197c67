//! Frame Compositor
//!
//! Replays the disposal-method state machine over decoded frames and
//! produces one full-screen raster per frame. Frames are drawn by direct
//! overwrite of their rectangle; transparent frame pixels replace what was
//! underneath.

use crate::color::Color;
use crate::document::AnimationDocument;
use crate::frame::{DecodedFrame, DisposalMethod, Rect};

/// Full-screen snapshot of the canvas after drawing one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositedFrame {
    /// 1-based position in the animation
    pub index: usize,
    /// The frame's own rectangle
    pub bounds: Rect,
    pub delay_ms: u32,
    pub disposal: DisposalMethod,
    pub width: u16,
    pub height: u16,
    /// Row-major RGBA, `width * height * 4` bytes
    pub rgba: Vec<u8>,
}

impl CompositedFrame {
    /// RGBA value at (x, y), if inside the screen
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        let offset = (y * self.width as usize + x) * 4;
        let p = &self.rgba[offset..offset + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Canvas state for one decode session
#[derive(Debug, Clone)]
pub struct Compositor {
    width: u16,
    height: u16,
    background: Color,
    canvas: Vec<u8>,
    snapshot: Option<Vec<u8>>,
    previous_disposal: DisposalMethod,
    previous_rect: Rect,
    drawn: usize,
}

impl Compositor {
    /// Fresh session with a fully transparent canvas
    pub fn new(width: u16, height: u16, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            canvas: vec![0; width as usize * height as usize * 4],
            snapshot: None,
            previous_disposal: DisposalMethod::Unspecified,
            previous_rect: Rect::full(width, height),
            drawn: 0,
        }
    }

    /// Session sized and colored for `doc`
    pub fn for_document(doc: &AnimationDocument) -> Self {
        Self::new(doc.width(), doc.height(), doc.background_color)
    }

    /// Current canvas contents
    pub fn canvas(&self) -> &[u8] {
        &self.canvas
    }

    /// Dispose the previous frame, draw `frame` and return the result
    pub fn draw(&mut self, frame: &DecodedFrame) -> CompositedFrame {
        self.dispose_previous();

        if frame.disposal == DisposalMethod::RestorePrevious {
            self.snapshot = Some(self.canvas.clone());
        }

        let bounds = frame.bounds();
        self.blit(bounds, &frame.rgba);
        self.drawn += 1;

        self.previous_disposal = frame.disposal;
        self.previous_rect = bounds;

        CompositedFrame {
            index: self.drawn,
            bounds,
            delay_ms: frame.delay_ms,
            disposal: frame.disposal,
            width: self.width,
            height: self.height,
            rgba: self.canvas.clone(),
        }
    }

    fn dispose_previous(&mut self) {
        match self.previous_disposal {
            DisposalMethod::RestoreBackground => {
                let fill = if self.background.a > 0 {
                    self.background.to_array()
                } else {
                    [0; 4]
                };
                self.fill(self.previous_rect, fill);
            }
            DisposalMethod::RestorePrevious => {
                if let Some(snapshot) = self.snapshot.take() {
                    self.canvas = snapshot;
                }
            }
            DisposalMethod::Unspecified | DisposalMethod::Keep | DisposalMethod::Reserved(_) => {}
        }
    }

    /// Screen columns and rows covered by `rect` after clipping
    fn clip(&self, rect: Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let (sw, sh) = (self.width as usize, self.height as usize);
        let left = (rect.left as usize).min(sw);
        let top = (rect.top as usize).min(sh);
        let right = (rect.left as usize + rect.width as usize).min(sw);
        let bottom = (rect.top as usize + rect.height as usize).min(sh);
        (left..right, top..bottom)
    }

    fn fill(&mut self, rect: Rect, color: [u8; 4]) {
        let (cols, rows) = self.clip(rect);
        let stride = self.width as usize * 4;
        for y in rows {
            let row = &mut self.canvas[y * stride + cols.start * 4..y * stride + cols.end * 4];
            for pixel in row.chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    fn blit(&mut self, rect: Rect, rgba: &[u8]) {
        let frame_stride = rect.width as usize * 4;
        if frame_stride == 0 {
            return;
        }
        let (cols, rows) = self.clip(rect);
        let stride = self.width as usize * 4;

        for (y, src) in rows.zip(rgba.chunks(frame_stride)) {
            // A short final row only covers its leading pixels
            let visible = (src.len() / 4).min(cols.len());
            let start = y * stride + cols.start * 4;
            self.canvas[start..start + visible * 4].copy_from_slice(&src[..visible * 4]);
        }
    }
}

/// Composite every frame of `doc`
pub fn compose(doc: &AnimationDocument) -> Vec<CompositedFrame> {
    CompositedFrames::new(doc).collect()
}

/// Lazily composited frames, one raster alive at a time
pub struct CompositedFrames<'a> {
    compositor: Compositor,
    frames: std::slice::Iter<'a, DecodedFrame>,
}

impl<'a> CompositedFrames<'a> {
    pub fn new(doc: &'a AnimationDocument) -> Self {
        Self {
            compositor: Compositor::for_document(doc),
            frames: doc.frames.iter(),
        }
    }
}

impl Iterator for CompositedFrames<'_> {
    type Item = CompositedFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;
        Some(self.compositor.draw(frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl ExactSizeIterator for CompositedFrames<'_> {}
