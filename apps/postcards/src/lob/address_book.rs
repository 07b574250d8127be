#![allow(dead_code)]

//! Address book: human-readable aliases → Lob address IDs.
//!
//! Stored as JSON at a well-known path:
//! ```json
//! { "from": "me", "addresses": { "me": "adr_123", "dianne": "adr_456" } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::lob::LobError;

#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("failed to read address book {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse address book {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasRole {
    To,
    From,
}

impl std::fmt::Display for AliasRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasRole::To => f.write_str("to"),
            AliasRole::From => f.write_str("from"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressBook {
    /// Alias of the default sender address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,

    /// Alias → Lob address ID.
    #[serde(default)]
    pub addresses: BTreeMap<String, String>,
}

/// Resolved Lob address IDs for one mailing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub to: String,
    pub from: String,
}

impl AddressBook {
    pub fn load(path: &Path) -> Result<Self, AddressBookError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AddressBookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book: AddressBook =
            serde_json::from_str(&raw).map_err(|source| AddressBookError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            aliases = book.addresses.len(),
            "Loaded address book from {}",
            path.display()
        );
        Ok(book)
    }

    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.addresses.get(alias).map(String::as_str)
    }

    /// Resolves the recipient alias and the book's default sender.
    pub fn route(&self, to: &str) -> Result<Route, LobError> {
        let to_id = self.resolve(to).ok_or_else(|| LobError::UnknownAlias {
            role: AliasRole::To,
            alias: to.to_string(),
        })?;
        let from_id = self
            .resolve(&self.from)
            .ok_or_else(|| LobError::UnknownAlias {
                role: AliasRole::From,
                alias: self.from.clone(),
            })?;
        Ok(Route {
            to: to_id.to_string(),
            from: from_id.to_string(),
        })
    }
}
