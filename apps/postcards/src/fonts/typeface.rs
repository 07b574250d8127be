//! The drawable-face abstraction consumed by the layout engine.
//!
//! A `Typeface` answers two questions at a given em size in pixels: where the
//! baseline sits relative to the top of the line, and what a single character
//! looks like (advance width plus an optional coverage bitmap). Everything the
//! canvas needs to draw a line comes through this trait, so the engine can run
//! against real outline fonts or a synthetic face in tests.

use std::fmt;

use thiserror::Error;

/// A line could not be drawn at all. Never retried by shrinking the font.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("font {face:?} has no glyph for {ch:?}")]
    MissingGlyph { face: String, ch: char },

    #[error("font {face:?} cannot be drawn at {em_px}px")]
    InvalidSize { face: String, em_px: f32 },
}

/// Anti-aliased coverage for one glyph, positioned relative to the pen.
///
/// `left`/`top` are the offsets of the bitmap's top-left pixel from the pen
/// position on the baseline (`top` is usually negative).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage values in `0.0..=1.0`, `width * height` long.
    pub coverage: Vec<f32>,
}

impl GlyphBitmap {
    pub fn coverage_at(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

/// A rasterized character: how far it moves the pen and what it paints.
/// Whitespace has an advance but no bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub advance: f32,
    pub bitmap: Option<GlyphBitmap>,
}

pub trait Typeface: Send + Sync + fmt::Debug {
    /// Registry name of this face (file stem for loaded fonts).
    fn name(&self) -> &str;

    /// Baseline offset of the first line below the top of its line box, in
    /// pixels. Defaults to the em height, which puts the baseline one em below
    /// the buffered corner of the safe rectangle.
    fn ascent(&self, em_px: f32) -> f32 {
        em_px
    }

    /// Rasterizes `ch` at `em_px`.
    fn glyph(&self, ch: char, em_px: f32) -> Result<Glyph, DrawError>;

    /// Horizontal kerning adjustment between two adjacent characters.
    fn kern(&self, _left: char, _right: char, _em_px: f32) -> f32 {
        0.0
    }
}
