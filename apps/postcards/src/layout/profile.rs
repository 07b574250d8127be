#![allow(dead_code)]

//! Postcard profiles: the geometry and typographic defaults of one card size.
//!
//! Profiles are process-wide constants. Adding a card size means adding a row
//! to `CATALOG`, never touching the fitting algorithm.
//!
//! Font sizes are in points; they become pixels through the profile's DPI
//! (`px = pt × dpi / 72`).

use serde::Serialize;

use crate::layout::error::LayoutError;

const POINTS_PER_INCH: f32 = 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// A pen position on the canvas, in (sub)pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pen {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned pixel rectangle, half-open: `min ≤ p < max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn contains(&self, pen: Pen) -> bool {
        pen.x >= self.min_x as f32
            && pen.x < self.max_x as f32
            && pen.y >= self.min_y as f32
            && pen.y < self.max_y as f32
    }

    /// True if `inner` lies inside `self` and is inset from every edge.
    pub fn strictly_contains(&self, inner: &Rect) -> bool {
        inner.min_x > self.min_x
            && inner.min_y > self.min_y
            && inner.max_x < self.max_x
            && inner.max_y < self.max_y
            && inner.min_x < inner.max_x
            && inner.min_y < inner.max_y
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PostcardProfile {
    /// Size identifier, also sent to the fulfillment service.
    pub id: &'static str,
    pub width: u32,
    pub height: u32,
    /// The only region guaranteed to survive trimming.
    pub safe_rect: Rect,
    pub dpi: f32,
    /// First font size tried by the fit search, in points.
    pub starting_font_size: f32,
    /// Vertical advance between baselines, as a multiple of the font size.
    pub line_spacing: f32,
    /// Inset inside `safe_rect` before the first line.
    pub safe_buffer_px: u32,
}

impl PostcardProfile {
    pub fn dimensions(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / POINTS_PER_INCH
    }

    /// Checks the profile's structural invariants.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |reason: &str| LayoutError::InvalidProfile {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };
        if !self.dimensions().strictly_contains(&self.safe_rect) {
            return Err(invalid("safe rectangle must be strictly inside the canvas"));
        }
        if !(self.starting_font_size.is_finite() && self.starting_font_size > 0.0) {
            return Err(invalid("starting font size must be positive"));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(invalid("dpi must be positive"));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(invalid("line spacing must be positive"));
        }
        if self.safe_buffer_px * 2 >= self.safe_rect.width().min(self.safe_rect.height()) {
            return Err(invalid("safe buffer leaves no room for text"));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// 6"×11" card at 300 DPI plus bleed.
pub const SIX_BY_ELEVEN: PostcardProfile = PostcardProfile {
    id: "6x11",
    width: 2250,
    height: 1250,
    safe_rect: Rect::new(76, 76, 2174, 1174),
    dpi: 300.0,
    starting_font_size: 400.0,
    line_spacing: 1.1,
    safe_buffer_px: 30,
};

/// Same card at 400 DPI and double the pixel dimensions.
pub const SIX_BY_ELEVEN_HIRES: PostcardProfile = PostcardProfile {
    id: "6x11-hires",
    width: 4500,
    height: 2500,
    safe_rect: Rect::new(152, 152, 4348, 2348),
    dpi: 400.0,
    starting_font_size: 500.0,
    line_spacing: 1.1,
    safe_buffer_px: 40,
};

static CATALOG: [PostcardProfile; 2] = [SIX_BY_ELEVEN, SIX_BY_ELEVEN_HIRES];

pub fn catalog() -> &'static [PostcardProfile] {
    &CATALOG
}

/// Resolves a size identifier. Unknown identifiers fail; there is no default.
pub fn lookup(size_id: &str) -> Result<&'static PostcardProfile, LayoutError> {
    CATALOG
        .iter()
        .find(|profile| profile.id == size_id)
        .ok_or_else(|| LayoutError::UnknownProfile(size_id.to_string()))
}
