pub mod outline;
pub mod registry;
#[cfg(test)]
pub mod testing;
pub mod typeface;

pub use registry::{FontError, FontRegistry, LoadPolicy};
pub use typeface::{DrawError, Glyph, GlyphBitmap, Typeface};
