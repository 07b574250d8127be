//! Delivery backends — pluggable, trait-based.
//!
//! Default: `LobClient` mails the card through the Lob API.
//! `DryRunSender` writes the rendered face to disk instead, for previews.
//!
//! The binary holds a `Box<dyn PostcardSender>` chosen from the command line.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::lob::{Confirmation, LobClient};

/// A rendered postcard ready for delivery.
#[derive(Debug, Clone)]
pub struct OutgoingCard {
    /// PNG-encoded front of the card.
    pub front_png: Vec<u8>,
    /// Profile identifier, e.g. `6x11`.
    pub size: String,
    /// Text printed on the back by the fulfillment service.
    pub message: String,
    /// Recipient alias.
    pub to: String,
}

#[async_trait]
pub trait PostcardSender: Send + Sync {
    /// Checks that `to` can be delivered to. Called before rendering so a bad
    /// alias fails without spending the render.
    fn check_recipient(&self, _to: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn send(&self, card: &OutgoingCard) -> Result<Confirmation, AppError>;
}

#[async_trait]
impl PostcardSender for LobClient {
    fn check_recipient(&self, to: &str) -> Result<(), AppError> {
        self.addresses().route(to)?;
        Ok(())
    }

    async fn send(&self, card: &OutgoingCard) -> Result<Confirmation, AppError> {
        Ok(self.send_card(card).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DryRunSender
// ────────────────────────────────────────────────────────────────────────────

/// Writes the card face to `preview_path` instead of mailing it.
pub struct DryRunSender {
    preview_path: PathBuf,
}

impl DryRunSender {
    pub fn new(preview_path: PathBuf) -> Self {
        Self { preview_path }
    }
}

#[async_trait]
impl PostcardSender for DryRunSender {
    async fn send(&self, card: &OutgoingCard) -> Result<Confirmation, AppError> {
        tokio::fs::write(&self.preview_path, &card.front_png).await?;
        info!(
            path = %self.preview_path.display(),
            bytes = card.front_png.len(),
            "Wrote postcard preview"
        );
        Ok(Confirmation {
            id: "dry-run".to_string(),
            url: format!("file://{}", self.preview_path.display()),
            expected_delivery: None,
        })
    }
}
