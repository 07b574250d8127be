//! Lob client: the single point of entry for mailing postcards.
//!
//! Uploads the rendered card face as a multipart form to the Lob postcards
//! API. Mailing is not idempotent, so failed requests are never retried.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod address_book;

pub use address_book::{AddressBook, AddressBookError, AliasRole, Route};

use crate::sender::OutgoingCard;

const LOB_POSTCARDS_URL: &str = "https://api.lob.com/v1/postcards";
const LOB_API_VERSION: &str = "2016-06-30";
const USER_AGENT: &str = concat!("postcards/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LobError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lob API auth failed")]
    Unauthorized,

    #[error("Lob API rejected the request as malformed: {0}")]
    BadRequest(String),

    #[error("Lob API resource not found: {0}")]
    NotFound(String),

    #[error("Lob API rate limit exceeded")]
    RateLimited,

    #[error("unexpected status code {status}: {body}")]
    Unexpected { status: u16, body: String },

    #[error("unknown `{role}` address alias {alias:?}")]
    UnknownAlias { role: AliasRole, alias: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lob's acknowledgement that a postcard has been queued for mailing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub id: String,
    pub url: String,
    #[serde(default, rename = "expected_delivery_date")]
    pub expected_delivery: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct LobErrorEnvelope {
    error: LobErrorBody,
}

#[derive(Debug, Deserialize)]
struct LobErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LobClient {
    client: Client,
    api_key: String,
    addresses: AddressBook,
}

impl LobClient {
    pub fn new(api_key: String, addresses: AddressBook) -> Result<Self, LobError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            addresses,
        })
    }

    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    /// Mails `card` to the address behind `card.to`.
    pub async fn send_card(&self, card: &OutgoingCard) -> Result<Confirmation, LobError> {
        let route = self.addresses.route(&card.to)?;
        let form = build_form(card, &route)?;

        debug!(
            to = %card.to,
            size = %card.size,
            bytes = card.front_png.len(),
            "Uploading postcard to Lob"
        );

        let response = self
            .client
            .post(LOB_POSTCARDS_URL)
            .header("Lob-Version", LOB_API_VERSION)
            .basic_auth(&self.api_key, None::<&str>)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_status(status, &body)?;

        let confirmation: Confirmation = serde_json::from_str(&body)?;
        info!(id = %confirmation.id, "Postcard accepted by Lob");
        Ok(confirmation)
    }
}

fn build_form(card: &OutgoingCard, route: &Route) -> Result<Form, LobError> {
    let front = Part::bytes(card.front_png.clone())
        .file_name("front.png")
        .mime_str("image/png")?;
    Ok(Form::new()
        .part("front", front)
        .text("to", route.to.clone())
        .text("from", route.from.clone())
        .text("size", card.size.clone())
        .text("message", card.message.clone()))
}

/// Maps a Lob response status onto the error taxonomy. Only 200 is success.
fn check_status(status: StatusCode, body: &str) -> Result<(), LobError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => Err(LobError::Unauthorized),
        StatusCode::BAD_REQUEST => Err(LobError::BadRequest(error_message(body))),
        StatusCode::NOT_FOUND => Err(LobError::NotFound(error_message(body))),
        StatusCode::TOO_MANY_REQUESTS => Err(LobError::RateLimited),
        other => {
            warn!("Lob API returned {other}: {body}");
            Err(LobError::Unexpected {
                status: other.as_u16(),
                body: body.to_string(),
            })
        }
    }
}

/// Pulls `error.message` out of a Lob error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<LobErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
