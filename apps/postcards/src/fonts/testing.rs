//! Font fixtures for tests: a synthetic block face and a real outline face.

use crate::fonts::outline::OutlineFace;
use crate::fonts::typeface::{DrawError, Glyph, GlyphBitmap, Typeface};

/// DejaVu Sans, checked in under `tests/fixtures` with its license.
pub const DEJAVU_SANS: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/DejaVuSans.ttf"
));

pub fn dejavu_sans() -> OutlineFace {
    OutlineFace::from_bytes("DejaVuSans", DEJAVU_SANS.to_vec()).unwrap()
}

/// Monospace face that paints every printable ASCII character as a solid
/// block. Each glyph advances `advance_em` ems and fills a box
/// `ink_em` wide and `cap_em` tall, sitting on the baseline.
/// Anything outside printable ASCII is reported as a missing glyph.
#[derive(Debug, Clone)]
pub struct BlockFace {
    pub name: String,
    pub advance_em: f32,
    pub ink_em: f32,
    pub cap_em: f32,
}

impl BlockFace {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            advance_em: 0.5,
            ink_em: 0.4,
            cap_em: 0.7,
        }
    }
}

impl Typeface for BlockFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph(&self, ch: char, em_px: f32) -> Result<Glyph, DrawError> {
        if !(ch == ' ' || ch.is_ascii_graphic()) {
            return Err(DrawError::MissingGlyph {
                face: self.name.clone(),
                ch,
            });
        }
        let advance = self.advance_em * em_px;
        if ch == ' ' {
            return Ok(Glyph {
                advance,
                bitmap: None,
            });
        }
        let width = (self.ink_em * em_px).round().max(1.0) as u32;
        let height = (self.cap_em * em_px).round().max(1.0) as u32;
        Ok(Glyph {
            advance,
            bitmap: Some(GlyphBitmap {
                left: 0,
                top: -(height as i32),
                width,
                height,
                coverage: vec![1.0; (width * height) as usize],
            }),
        })
    }
}
