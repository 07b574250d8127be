use std::path::PathBuf;

use clap::Parser;

/// Render text onto a postcard and mail it through Lob.
#[derive(Debug, Parser)]
#[command(name = "postcards", version, about)]
pub struct Cli {
    /// A line for the front of the card. Repeat for multiple lines.
    #[arg(long = "lines", required = true, value_name = "LINE")]
    pub lines: Vec<String>,

    /// Message printed on the back of the card.
    #[arg(long)]
    pub message: String,

    /// Address-book alias of the recipient.
    #[arg(long, default_value = "dianne")]
    pub to: String,

    /// Preferred font; repeat to give fallbacks in order.
    #[arg(long = "font", value_name = "NAME")]
    pub fonts: Vec<String>,

    /// Card size identifier.
    #[arg(long, default_value = "6x11")]
    pub size: String,

    /// Render the card and write a preview instead of mailing it.
    #[arg(long = "dry-run", alias = "dryrun")]
    pub dry_run: bool,

    /// Where the dry-run preview is written.
    #[arg(long, env = "POSTCARD_PREVIEW", default_value = "/tmp/postcard-preview.png")]
    pub preview: PathBuf,
}

impl Cli {
    /// The message with surrounding whitespace removed; `None` if nothing is left.
    pub fn trimmed_message(&self) -> Option<String> {
        let message = self.message.trim();
        (!message.is_empty()).then(|| message.to_string())
    }
}
