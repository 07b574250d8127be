#![allow(dead_code)]

//! The Postcard: profile + font + palette + text, rendered on demand.
//!
//! A postcard borrows its font from the registry and holds no render state;
//! every `render` call runs a fresh fit search, so repeated renders of the
//! same postcard produce identical bytes.

use image::RgbImage;
use tracing::info;

use crate::fonts::{FontRegistry, Typeface};
use crate::layout::{encode_png, fit, lookup, FitPolicy, LayoutError, Palette, PostcardProfile};

/// Shape of a finished render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG-encoded bytes, ready to upload or write to disk.
    #[default]
    Png,
    /// The raw pixel buffer, for callers that encode it themselves.
    Pixels,
}

pub enum Rendered {
    Png(Vec<u8>),
    Pixels(RgbImage),
}

/// A finished render and the font size the fit search settled on.
pub struct RenderOutput {
    pub rendered: Rendered,
    pub font_size: f32,
    pub attempts: usize,
}

pub struct Postcard<'r> {
    registry: &'r FontRegistry,
    profile: PostcardProfile,
    font: &'r dyn Typeface,
    palette: Palette,
    lines: Vec<String>,
    message: String,
    policy: FitPolicy,
}

impl<'r> Postcard<'r> {
    /// Creates a postcard using the registry's default font and black-on-white
    /// palette. An unknown `size` fails immediately.
    pub fn new(
        registry: &'r FontRegistry,
        size: &str,
        lines: Vec<String>,
        message: impl Into<String>,
    ) -> Result<Self, LayoutError> {
        let profile = *lookup(size)?;
        Ok(Self::with_profile(registry, profile, lines, message))
    }

    /// Creates a postcard for a profile outside the built-in catalog.
    pub fn with_profile(
        registry: &'r FontRegistry,
        profile: PostcardProfile,
        lines: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            profile,
            font: registry.default_face(),
            palette: Palette::default(),
            lines,
            message: message.into(),
            policy: FitPolicy::default(),
        }
    }

    /// Adopts the first of `names` present in the registry and returns `true`.
    /// Returns `false` and keeps the current font if none match.
    pub fn set_font_preferences<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        let registry = self.registry;
        match names.iter().find_map(move |name| registry.get(name.as_ref())) {
            Some(face) => {
                self.font = face;
                true
            }
            None => false,
        }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn set_fit_policy(&mut self, policy: FitPolicy) {
        self.policy = policy;
    }

    pub fn profile(&self) -> &PostcardProfile {
        &self.profile
    }

    pub fn font_name(&self) -> &str {
        self.font.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Fits the text and returns the card face as PNG bytes.
    pub fn render(&self) -> Result<Vec<u8>, LayoutError> {
        let (image, _, _) = self.rasterize()?;
        Ok(encode_png(&image)?)
    }

    pub fn render_as(&self, format: OutputFormat) -> Result<RenderOutput, LayoutError> {
        let (image, font_size, attempts) = self.rasterize()?;
        let rendered = match format {
            OutputFormat::Png => Rendered::Png(encode_png(&image)?),
            OutputFormat::Pixels => Rendered::Pixels(image),
        };
        Ok(RenderOutput {
            rendered,
            font_size,
            attempts,
        })
    }

    /// Runs the fit search and returns the pixels, chosen size and attempt count.
    fn rasterize(&self) -> Result<(RgbImage, f32, usize), LayoutError> {
        let fitted = fit(
            &self.profile,
            self.font,
            &self.lines,
            self.palette,
            &self.policy,
        )?;
        let font_size = fitted.font_size();
        let attempts = fitted.attempted_sizes.len();

        info!(
            size = self.profile.id,
            font = self.font.name(),
            lines = self.lines.len(),
            font_size,
            attempts,
            "Postcard rendered"
        );

        Ok((fitted.laid_out.canvas.into_image(), font_size, attempts))
    }
}
