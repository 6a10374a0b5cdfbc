//! # Rassegna Trentino
//!
//! A daily batch job that builds a Markdown press review from the RSS
//! feeds of regional Trentino-Alto Adige news outlets.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: download and parse each configured feed, in order, one at
//!    a time
//! 2. **Filter**: keep entries whose title or summary contains a
//!    configured keyword (case-insensitive substring)
//! 3. **Sort**: order the combined list by `(source, published)` as raw
//!    strings
//! 4. **Render**: write `rassegna_<YYYY-MM-DD>.md` into the output
//!    directory
//!
//! A source that fails to fetch or parse is logged and skipped; a run that
//! matches nothing logs "Nessuna notizia trovata per oggi." and writes no
//! file. Both are clean exits.
//!
//! ## Usage
//!
//! ```sh
//! rassegna_trentino
//! rassegna_trentino -o /srv/rassegna -c feeds.yaml
//! ```

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod feeds;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use config::AppConfig;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("rassegna_trentino starting up");

    // Parse CLI and resolve configuration
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.config, "Parsed CLI arguments");

    let config = match args.config.as_deref() {
        Some(path) => {
            let config = config::load_config(path)?;
            info!(path, "Loaded configuration file");
            config
        }
        None => AppConfig::default(),
    };
    info!(
        feeds = %config.feeds.iter().map(|f| f.name.as_str()).join(", "),
        keywords = config.keywords.len(),
        "Configured sources"
    );

    // Early check: ensure the output dir is writable before any network I/O
    ensure_writable_dir(&args.output_dir).await?;

    // ---- Fetch and filter, one source at a time ----
    let client = feeds::build_client()?;
    let fetches = feeds::fetch_all(&client, &config).await;

    for fetch in &fetches {
        match &fetch.outcome {
            Ok(items) => debug!(source = %fetch.source, count = items.len(), "Source done"),
            Err(e) => warn!(source = %fetch.source, error = %e, "Errore nella fonte"),
        }
    }

    let mut items = feeds::merge(fetches);
    if items.is_empty() {
        info!("Nessuna notizia trovata per oggi.");
        return Ok(());
    }
    info!(count = items.len(), "Notizie raccolte");

    // ---- Sort and render ----
    models::sort_digest(&mut items);

    let today = Local::now().date_naive().to_string();
    let path = outputs::markdown::write_digest(&items, &today, &args.output_dir).await?;
    info!(path = %path.display(), "Rassegna generata");

    Ok(())
}
