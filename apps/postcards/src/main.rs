mod cli;
mod config;
mod errors;
mod fonts;
mod layout;
mod lob;
mod postcard;
mod sender;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::fonts::{FontError, FontRegistry, LoadPolicy};
use crate::lob::{AddressBook, LobClient};
use crate::postcard::Postcard;
use crate::sender::{DryRunSender, OutgoingCard, PostcardSender};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let Some(message) = cli.trimmed_message() else {
        Cli::command()
            .error(
                clap::error::ErrorKind::InvalidValue,
                "--message must not be empty",
            )
            .exit();
    };

    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting postcards v{}", env!("CARGO_PKG_VERSION"));

    // Font registry: loaded once, shared read-only with the render task.
    let mut registry = FontRegistry::load_dir(&config.fonts_dir, LoadPolicy::Skip)
        .with_context(|| format!("loading fonts from {}", config.fonts_dir.display()))?;
    if let Some(name) = &config.default_font {
        registry.set_default(name)?;
    }
    let registry = Arc::new(registry);

    let sender: Box<dyn PostcardSender> = if cli.dry_run {
        Box::new(DryRunSender::new(cli.preview.clone()))
    } else {
        let api_key = config.require_lob_api_key()?.to_string();
        let addresses = AddressBook::load(&config.address_book_path()?)?;
        Box::new(LobClient::new(api_key, addresses)?)
    };
    sender.check_recipient(&cli.to)?;

    let card = render_front(
        Arc::clone(&registry),
        cli.size.clone(),
        cli.lines.clone(),
        cli.fonts.clone(),
        message,
        cli.to.clone(),
    )
    .await?;
    let confirmation = sender.send(&card).await?;

    if cli.dry_run {
        println!("Wrote postcard preview to {}", cli.preview.display());
    } else {
        println!("{}", confirmation.url);
        match confirmation.expected_delivery {
            Some(date) => println!("{date}"),
            None => println!("expected delivery date not reported"),
        }
    }

    Ok(())
}

/// Builds the postcard and renders its front into an outgoing card. Fitting
/// is CPU-bound, so it runs on the blocking pool.
async fn render_front(
    registry: Arc<FontRegistry>,
    size: String,
    lines: Vec<String>,
    fonts: Vec<String>,
    message: String,
    to: String,
) -> Result<OutgoingCard> {
    tokio::task::spawn_blocking(move || -> Result<OutgoingCard, AppError> {
        let mut postcard = Postcard::new(&registry, &size, lines, message)?;
        if !fonts.is_empty() && !postcard.set_font_preferences(&fonts) {
            let installed: Vec<&str> = registry.names().collect();
            warn!(?installed, "None of the requested fonts are installed");
            return Err(FontError::NoPreferredFont { names: fonts }.into());
        }
        Ok(OutgoingCard {
            front_png: postcard.render()?,
            size: postcard.profile().id.to_string(),
            message: postcard.message().to_string(),
            to,
        })
    })
    .await
    .map_err(|e| anyhow!("render task failed: {e}"))?
    .map_err(Into::into)
}
