//! TrueType / OpenType faces backed by `ab_glyph`.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};

use crate::fonts::typeface::{DrawError, Glyph, GlyphBitmap, Typeface};

/// Fallback when a font's head table does not report units-per-em.
const DEFAULT_UNITS_PER_EM: f32 = 1000.0;

/// An outline font parsed from a `.ttf` / `.otf` file.
pub struct OutlineFace {
    name: String,
    font: FontVec,
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl OutlineFace {
    /// Parses raw font bytes. Fails with `ab_glyph::InvalidFont` for anything
    /// that is not a readable TrueType / OpenType face.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self, ab_glyph::InvalidFont> {
        Ok(Self {
            name: name.into(),
            font: FontVec::try_from_vec(data)?,
        })
    }

    /// Converts an em size to the `PxScale` ab_glyph expects, which measures
    /// ascent-to-descent height rather than the em square.
    fn scale_for(&self, em_px: f32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(DEFAULT_UNITS_PER_EM);
        PxScale::from(em_px * self.font.height_unscaled() / units_per_em)
    }

    fn glyph_id(&self, ch: char) -> Result<GlyphId, DrawError> {
        let id = self.font.glyph_id(ch);
        // Glyph 0 is .notdef: the font has no outline for this character.
        if id.0 == 0 && !ch.is_whitespace() {
            return Err(DrawError::MissingGlyph {
                face: self.name.clone(),
                ch,
            });
        }
        Ok(id)
    }
}

impl Typeface for OutlineFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph(&self, ch: char, em_px: f32) -> Result<Glyph, DrawError> {
        if !em_px.is_finite() || em_px <= 0.0 {
            return Err(DrawError::InvalidSize {
                face: self.name.clone(),
                em_px,
            });
        }

        let id = self.glyph_id(ch)?;
        let scale = self.scale_for(em_px);
        let advance = self.font.as_scaled(scale).h_advance(id);

        let positioned = id.with_scale_and_position(scale, point(0.0, 0.0));
        let bitmap = self.font.outline_glyph(positioned).map(|outlined| {
            let bounds = outlined.px_bounds();
            let width = bounds.width().max(0.0) as u32;
            let height = bounds.height().max(0.0) as u32;
            let mut coverage = vec![0.0_f32; (width * height) as usize];
            outlined.draw(|x, y, c| {
                if x < width && y < height {
                    coverage[(y * width + x) as usize] = c;
                }
            });
            GlyphBitmap {
                left: bounds.min.x as i32,
                top: bounds.min.y as i32,
                width,
                height,
                coverage,
            }
        });

        Ok(Glyph { advance, bitmap })
    }

    fn kern(&self, left: char, right: char, em_px: f32) -> f32 {
        let scaled = self.font.as_scaled(self.scale_for(em_px));
        scaled.kern(self.font.glyph_id(left), self.font.glyph_id(right))
    }
}
