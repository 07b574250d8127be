use thiserror::Error;

use crate::fonts::DrawError;

/// Failures of the render path. A render either produces a complete image or
/// exactly one of these.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("unknown postcard size {0:?}")]
    UnknownProfile(String),

    #[error("invalid postcard profile {id:?}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("invalid fit policy: {0}")]
    InvalidPolicy(String),

    #[error("draw failed: {0}")]
    Draw(#[from] DrawError),

    #[error("text does not fit after {attempts} attempts (smallest size tried: {smallest_font_size:.2}pt)")]
    Infeasible {
        attempts: usize,
        smallest_font_size: f32,
    },

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
