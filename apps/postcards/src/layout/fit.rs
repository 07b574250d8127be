//! Fit Search: shrink the font until a layout attempt succeeds.
//!
//! Starting at the profile's size, every `TooBig` multiplies the size by
//! `shrink_ratio`. Draw failures are terminal. The search is bounded by a
//! minimum font size and an attempt budget; hitting either returns
//! `LayoutError::Infeasible` instead of looping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fonts::Typeface;
use crate::layout::attempt::{layout_attempt, AttemptError, LaidOut};
use crate::layout::canvas::Palette;
use crate::layout::error::LayoutError;
use crate::layout::profile::PostcardProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitPolicy {
    /// Multiplier applied after each `TooBig`, in `(0, 1)`.
    pub shrink_ratio: f32,
    /// Shrunk sizes below this (points) are never attempted. The profile's
    /// starting size is always tried once.
    pub min_font_size: f32,
    pub max_attempts: u32,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            shrink_ratio: 0.75,
            min_font_size: 4.0,
            max_attempts: 64,
        }
    }
}

impl FitPolicy {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.shrink_ratio > 0.0 && self.shrink_ratio < 1.0) {
            return Err(LayoutError::InvalidPolicy(format!(
                "shrink ratio must be in (0, 1), got {}",
                self.shrink_ratio
            )));
        }
        if !(self.min_font_size.is_finite() && self.min_font_size > 0.0) {
            return Err(LayoutError::InvalidPolicy(format!(
                "minimum font size must be positive, got {}",
                self.min_font_size
            )));
        }
        if self.max_attempts == 0 {
            return Err(LayoutError::InvalidPolicy(
                "at least one attempt is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// The winning attempt plus the sizes tried on the way, in order.
pub struct Fitted {
    pub laid_out: LaidOut,
    pub attempted_sizes: Vec<f32>,
}

impl Fitted {
    pub fn font_size(&self) -> f32 {
        self.laid_out.font_size
    }
}

pub fn fit<S: AsRef<str>>(
    profile: &PostcardProfile,
    face: &dyn Typeface,
    lines: &[S],
    palette: Palette,
    policy: &FitPolicy,
) -> Result<Fitted, LayoutError> {
    profile.validate()?;
    policy.validate()?;

    let mut font_size = profile.starting_font_size;
    let mut attempted_sizes = Vec::new();

    loop {
        // The starting size is always tried; the floor only bounds shrunk sizes.
        let below_floor = !attempted_sizes.is_empty() && font_size < policy.min_font_size;
        if below_floor || attempted_sizes.len() as u32 >= policy.max_attempts {
            return Err(LayoutError::Infeasible {
                attempts: attempted_sizes.len(),
                smallest_font_size: attempted_sizes.last().copied().unwrap_or(font_size),
            });
        }
        attempted_sizes.push(font_size);

        match layout_attempt(profile, face, font_size, lines, palette) {
            Ok(laid_out) => {
                debug!(
                    profile = profile.id,
                    font = face.name(),
                    font_size,
                    attempts = attempted_sizes.len(),
                    "Text fits"
                );
                return Ok(Fitted {
                    laid_out,
                    attempted_sizes,
                });
            }
            Err(AttemptError::TooBig { line, pen }) => {
                debug!(
                    font_size,
                    line,
                    x = pen.x,
                    y = pen.y,
                    "Line left the safe area, shrinking"
                );
                font_size *= policy.shrink_ratio;
            }
            Err(AttemptError::Draw(e)) => return Err(LayoutError::Draw(e)),
        }
    }
}
