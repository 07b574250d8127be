//! Layout Attempt: one top-to-bottom draw pass of every line at a fixed size.
//!
//! Bounds are checked after each line rather than pre-measured, so an attempt
//! stops at the first line whose pen ends up outside the safe rectangle.

use crate::fonts::{DrawError, Typeface};
use crate::layout::canvas::{Canvas, Palette};
use crate::layout::profile::{Pen, PostcardProfile};

/// Why a single attempt did not produce a canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptError {
    /// Line `line` ended at `pen`, outside the safe rectangle. Recoverable by
    /// shrinking the font.
    TooBig { line: usize, pen: Pen },
    /// The face could not draw the text at all.
    Draw(DrawError),
}

impl From<DrawError> for AttemptError {
    fn from(e: DrawError) -> Self {
        AttemptError::Draw(e)
    }
}

/// A successful attempt: the canvas plus the pen position after each line.
pub struct LaidOut {
    pub canvas: Canvas,
    pub font_size: f32,
    pub line_ends: Vec<Pen>,
}

pub fn layout_attempt<S: AsRef<str>>(
    profile: &PostcardProfile,
    face: &dyn Typeface,
    font_size: f32,
    lines: &[S],
    palette: Palette,
) -> Result<LaidOut, AttemptError> {
    let em_px = profile.points_to_pixels(font_size);
    let line_advance = profile.points_to_pixels(font_size * profile.line_spacing);
    let safe = profile.safe_rect;

    let mut canvas = Canvas::new(profile.width, profile.height, palette);

    let start_x = (safe.min_x + profile.safe_buffer_px) as f32;
    let mut pen = Pen {
        x: start_x,
        y: (safe.min_y + profile.safe_buffer_px) as f32 + face.ascent(em_px),
    };

    let mut line_ends = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let end = canvas.draw_line(face, line.as_ref(), em_px, pen)?;
        if !safe.contains(end) {
            return Err(AttemptError::TooBig {
                line: index,
                pen: end,
            });
        }
        line_ends.push(end);

        pen.x = start_x;
        pen.y += line_advance;
    }

    Ok(LaidOut {
        canvas,
        font_size,
        line_ends,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::testing::BlockFace;
    use crate::layout::profile::{Rect, SIX_BY_ELEVEN};

    /// 1000×1000 canvas at 72 DPI, so points equal pixels.
    fn square_profile() -> PostcardProfile {
        PostcardProfile {
            id: "test-square",
            width: 1000,
            height: 1000,
            safe_rect: Rect::new(100, 100, 900, 900),
            dpi: 72.0,
            starting_font_size: 100.0,
            line_spacing: 1.1,
            safe_buffer_px: 10,
        }
    }

    #[test]
    fn test_first_baseline_is_one_em_below_buffered_corner() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        let laid = layout_attempt(&profile, &face, 50.0, &["ab"], Palette::default()).unwrap();
        // x = 100 + 10 + 2 × 25, y = 100 + 10 + 50
        assert_eq!(laid.line_ends, vec![Pen { x: 160.0, y: 160.0 }]);
    }

    #[test]
    fn test_lines_advance_by_font_size_times_spacing() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        let laid =
            layout_attempt(&profile, &face, 50.0, &["a", "b", "c"], Palette::default()).unwrap();
        let ys: Vec<f32> = laid.line_ends.iter().map(|p| p.y).collect();
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - 55.0).abs() < 1e-3, "got {ys:?}");
        }
    }

    #[test]
    fn test_too_wide_line_reports_too_big() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        // 40 chars × 25px = 1000px, wider than the 800px safe width.
        let wide = "X".repeat(40);
        let result = layout_attempt(&profile, &face, 50.0, &["ok", wide.as_str()], Palette::default());
        match result {
            Err(AttemptError::TooBig { line, pen }) => {
                assert_eq!(line, 1);
                assert!(pen.x >= 900.0);
            }
            Err(other) => panic!("expected TooBig, got {other:?}"),
            Ok(_) => panic!("expected TooBig, got success"),
        }
    }

    #[test]
    fn test_too_many_lines_reports_too_big_on_first_overflowing_line() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        // Baselines at 210, 320, 430, ... ; the 8th lands at 980 ≥ 900.
        let lines = vec!["a"; 10];
        match layout_attempt(&profile, &face, 100.0, &lines, Palette::default()) {
            Err(AttemptError::TooBig { line, .. }) => assert_eq!(line, 7),
            Err(other) => panic!("expected TooBig, got {other:?}"),
            Ok(_) => panic!("expected TooBig, got success"),
        }
    }

    #[test]
    fn test_draw_failure_is_not_too_big() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        let result = layout_attempt(&profile, &face, 10.0, &["naïve"], Palette::default());
        assert!(matches!(result, Err(AttemptError::Draw(_))));
    }

    #[test]
    fn test_empty_lines_yield_blank_canvas() {
        let face = BlockFace::named("Block");
        let lines: [&str; 0] = [];
        let palette = Palette::default();
        let laid = layout_attempt(&SIX_BY_ELEVEN, &face, 400.0, &lines, palette).unwrap();
        assert!(laid.line_ends.is_empty());
        let image = laid.canvas.image();
        assert_eq!((image.width(), image.height()), (2250, 1250));
        assert!(image.pixels().all(|p| p.0 == palette.background));
    }

    #[test]
    fn test_empty_string_line_occupies_a_row() {
        let profile = square_profile();
        let face = BlockFace::named("Block");
        let laid = layout_attempt(&profile, &face, 50.0, &["", "b"], Palette::default()).unwrap();
        assert_eq!(laid.line_ends[0], Pen { x: 110.0, y: 160.0 });
        assert!((laid.line_ends[1].y - 215.0).abs() < 1e-3);
    }
}
