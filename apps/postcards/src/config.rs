use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_FONTS_DIR: &str = "/Library/Fonts"; // macOS default
const ADDRESS_BOOK_FILE: &str = ".postcards.json";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Only required for real sends; dry runs never touch the Lob API.
    pub lob_api_key: Option<String>,
    pub fonts_dir: PathBuf,
    /// Explicit address book location; see `address_book_path`.
    pub address_book: Option<PathBuf>,
    pub home: Option<PathBuf>,
    /// Overrides the registry's default face when set.
    pub default_font: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            lob_api_key: optional_env("LOB_API_KEY"),
            fonts_dir: optional_env("POSTCARD_FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FONTS_DIR)),
            address_book: optional_env("POSTCARDS_ADDRESS_BOOK").map(PathBuf::from),
            home: std::env::var_os("HOME").map(PathBuf::from),
            default_font: optional_env("POSTCARD_DEFAULT_FONT"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn require_lob_api_key(&self) -> Result<&str> {
        self.lob_api_key
            .as_deref()
            .context("LOB_API_KEY environment variable unset")
    }

    /// Resolves the address book location, falling back to `~/.postcards.json`.
    pub fn address_book_path(&self) -> Result<PathBuf> {
        match (&self.address_book, &self.home) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(home)) => Ok(home.join(ADDRESS_BOOK_FILE)),
            (None, None) => anyhow::bail!(
                "HOME is not set; set POSTCARDS_ADDRESS_BOOK to locate the address book"
            ),
        }
    }
}

/// Reads `key`, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
