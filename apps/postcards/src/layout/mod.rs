// Text-fitting engine: profiles, the single-pass layout attempt, and the
// shrinking fit search that drives it. Everything here is synchronous and
// CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod attempt;
pub mod canvas;
pub mod error;
pub mod fit;
pub mod profile;

// Re-export the public API consumed by the postcard and the binary.
pub use canvas::{encode_png, Palette};
pub use error::LayoutError;
pub use fit::{fit, FitPolicy};
pub use profile::{lookup, PostcardProfile};
