use thiserror::Error;

use crate::fonts::FontError;
use crate::layout::LayoutError;
use crate::lob::{AddressBookError, LobError};

/// Application-level error type.
/// Every module error funnels into this so the binary reports exactly one failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Render error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Lob error: {0}")]
    Lob(#[from] LobError),

    #[error("Address book error: {0}")]
    AddressBook(#[from] AddressBookError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
