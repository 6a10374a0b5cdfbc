//! Markdown rendering and writing of the daily press review.
//!
//! The document template is fixed, in Italian: a dated header, then one
//! section per item with title, source, date, article link, and the
//! summary shortened to 300 characters on a word boundary.

use crate::models::NewsItem;
use crate::utils::shorten;
use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Maximum rendered summary length, placeholder included.
const SUMMARY_WIDTH: usize = 300;

/// Render the ordered items into the digest document.
///
/// Rendering is pure: the same items and date always produce the same
/// bytes, so a re-run on identical feed data overwrites the day's file
/// with identical content.
pub fn digest_to_markdown(items: &[NewsItem], date: &str) -> String {
    let mut md = String::new();
    writeln!(md, "# 📰 Rassegna Stampa Trentino-Alto Adige – {}\n", date).unwrap();

    for item in items {
        writeln!(md, "## {}", item.title).unwrap();
        writeln!(md, "**Fonte:** {}  ", item.source).unwrap();
        writeln!(md, "**Data:** {}  ", item.published).unwrap();
        writeln!(md, "🔗 [Leggi l’articolo]({})\n", item.link).unwrap();
        writeln!(md, "{}\n\n---\n", shorten(&item.summary, SUMMARY_WIDTH)).unwrap();
    }

    md
}

/// Write the rendered digest to `<output_dir>/rassegna_<date>.md`.
///
/// The directory is created if absent and an existing file for the same
/// date is overwritten. Returns the written path.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, date = %date))]
pub async fn write_digest(
    items: &[NewsItem],
    date: &str,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;

    let path = PathBuf::from(output_dir).join(format!("rassegna_{}.md", date));
    fs::write(&path, digest_to_markdown(items, date)).await?;
    info!(path = %path.display(), items = items.len(), "Wrote digest");

    Ok(path)
}
