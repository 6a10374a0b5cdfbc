//! Command-line interface definitions for the press review generator.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Every option has a default, so running the binary with no
//! arguments produces the standard daily review: the built-in regional
//! feeds, the built-in keywords, and the `rassegna_stampa` directory.

use clap::Parser;

/// Command-line arguments for the press review generator.
///
/// # Examples
///
/// ```sh
/// # Standard daily run
/// rassegna_trentino
///
/// # Write the digest somewhere else
/// rassegna_trentino -o /srv/rassegna
///
/// # Use a custom feed/keyword configuration
/// rassegna_trentino -c feeds.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the Markdown digest
    #[arg(short, long, default_value = "rassegna_stampa")]
    pub output_dir: String,

    /// Optional path to a YAML file overriding feeds and/or keywords
    #[arg(short, long)]
    pub config: Option<String>,
}
