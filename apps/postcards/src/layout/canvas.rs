//! Two-color raster canvas and the line-drawing primitive.
//!
//! Glyph coverage is quantized against the palette: a pixel is painted with
//! the foreground when coverage reaches `INK_THRESHOLD`, otherwise it stays
//! background. The canvas therefore never holds more than the two palette colors.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::fonts::{DrawError, GlyphBitmap, Typeface};
use crate::layout::profile::Pen;

const INK_THRESHOLD: f32 = 0.5;

/// Background and foreground colors, as RGB triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for Palette {
    /// Black text on white.
    fn default() -> Self {
        Self {
            background: [0xff, 0xff, 0xff],
            foreground: [0x00, 0x00, 0x00],
        }
    }
}

pub struct Canvas {
    image: RgbImage,
    palette: Palette,
}

impl Canvas {
    /// Allocates a canvas filled entirely with the background color.
    pub fn new(width: u32, height: u32, palette: Palette) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(palette.background)),
            palette,
        }
    }

    /// Draws `text` as a single run starting at `origin` (on the baseline) and
    /// returns the pen position just past the last glyph. Pixels falling
    /// outside the canvas are clipped.
    pub fn draw_line(
        &mut self,
        face: &dyn Typeface,
        text: &str,
        em_px: f32,
        origin: Pen,
    ) -> Result<Pen, DrawError> {
        let mut pen = origin;
        let mut previous: Option<char> = None;
        for ch in text.chars() {
            if let Some(left) = previous {
                pen.x += face.kern(left, ch, em_px);
            }
            let glyph = face.glyph(ch, em_px)?;
            if let Some(bitmap) = &glyph.bitmap {
                let x = pen.x.round() as i64 + i64::from(bitmap.left);
                let y = pen.y.round() as i64 + i64::from(bitmap.top);
                self.stamp(bitmap, x, y);
            }
            pen.x += glyph.advance;
            previous = Some(ch);
        }
        Ok(pen)
    }

    fn stamp(&mut self, bitmap: &GlyphBitmap, origin_x: i64, origin_y: i64) {
        let ink = Rgb(self.palette.foreground);
        let (width, height) = (i64::from(self.image.width()), i64::from(self.image.height()));
        for gy in 0..bitmap.height {
            let y = origin_y + i64::from(gy);
            if y < 0 || y >= height {
                continue;
            }
            for gx in 0..bitmap.width {
                let x = origin_x + i64::from(gx);
                if x < 0 || x >= width {
                    continue;
                }
                if bitmap.coverage_at(gx, gy) >= INK_THRESHOLD {
                    self.image.put_pixel(x as u32, y as u32, ink);
                }
            }
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Serializes a finished pixel buffer as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::testing::BlockFace;

    #[test]
    fn test_new_canvas_is_background_only() {
        let palette = Palette::default();
        let canvas = Canvas::new(16, 8, palette);
        assert!(canvas
            .image()
            .pixels()
            .all(|p| p.0 == palette.background));
    }

    #[test]
    fn test_draw_line_advances_pen_per_character() {
        let face = BlockFace::named("Block");
        let mut canvas = Canvas::new(200, 100, Palette::default());
        let end = canvas
            .draw_line(&face, "abc", 20.0, Pen { x: 10.0, y: 50.0 })
            .unwrap();
        // 3 glyphs × 0.5em × 20px
        assert!((end.x - 40.0).abs() < 1e-4, "got {end:?}");
        assert_eq!(end.y, 50.0);
    }

    #[test]
    fn test_draw_line_paints_only_palette_colors() {
        let palette = Palette {
            background: [10, 20, 30],
            foreground: [200, 100, 0],
        };
        let face = BlockFace::named("Block");
        let mut canvas = Canvas::new(120, 60, palette);
        canvas
            .draw_line(&face, "Hi there", 12.0, Pen { x: 4.0, y: 40.0 })
            .unwrap();
        let mut saw_ink = false;
        for pixel in canvas.image().pixels() {
            assert!(pixel.0 == palette.background || pixel.0 == palette.foreground);
            saw_ink |= pixel.0 == palette.foreground;
        }
        assert!(saw_ink, "text should leave foreground pixels");
    }

    #[test]
    fn test_draw_line_clips_outside_canvas() {
        let face = BlockFace::named("Block");
        let mut canvas = Canvas::new(20, 20, Palette::default());
        // Starts left of and above the canvas; must not panic.
        let end = canvas
            .draw_line(&face, "WWWWWW", 30.0, Pen { x: -15.0, y: 5.0 })
            .unwrap();
        assert!(end.x > 20.0);
    }

    #[test]
    fn test_draw_line_unsupported_glyph_fails() {
        let face = BlockFace::named("Block");
        let mut canvas = Canvas::new(50, 50, Palette::default());
        let err = canvas
            .draw_line(&face, "a☃b", 10.0, Pen { x: 0.0, y: 20.0 })
            .unwrap_err();
        assert_eq!(
            err,
            DrawError::MissingGlyph {
                face: "Block".to_string(),
                ch: '☃'
            }
        );
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = Canvas::new(4, 4, Palette::default());
        let bytes = encode_png(canvas.image()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
