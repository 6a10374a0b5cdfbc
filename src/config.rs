//! Run configuration: feed list, keyword list, and the optional YAML
//! override file.
//!
//! The configuration is an immutable value built once in `main` and passed
//! into the pipeline, never global state. [`AppConfig::default`] is the
//! reference setup: six regional outlets and the fixed keyword list for
//! the Trentino-Alto Adige press review. A YAML file may replace either
//! list; a key left out of the file keeps its default.
//!
//! ```yaml
//! feeds:
//!   - name: "L'Adige"
//!     url: "https://www.ladige.it/rss"
//! keywords:
//!   - Trento
//!   - autonomia
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// A configured news outlet: display label plus RSS feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedSource {
    /// Label shown in the digest's "Fonte" line and in log output.
    pub name: String,
    /// The RSS feed URL.
    pub url: String,
}

/// The full run configuration.
///
/// Feeds are fetched in the order listed here, and that order also drives
/// the concatenation of per-source results before sorting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// The outlets to poll, in fetch order.
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSource>,
    /// Case-insensitive substrings an entry must contain (in title or
    /// summary) to make it into the digest.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            keywords: default_keywords(),
        }
    }
}

static DEFAULT_FEEDS: Lazy<Vec<FeedSource>> = Lazy::new(|| {
    [
        ("L'Adige", "https://www.ladige.it/rss"),
        ("Il Dolomiti", "https://www.ildolomiti.it/rss.xml"),
        ("Salto.bz", "https://www.salto.bz/rss.xml"),
        ("Südtirol News", "https://www.suedtirolnews.it/feed"),
        (
            "Rai TGR Trento",
            "https://www.rainews.it/tgr/trento/notiziari/video-nazio-rss",
        ),
        (
            "Rai TGR Bolzano",
            "https://www.rainews.it/tgr/bolzano/notiziari/video-nazio-rss",
        ),
    ]
    .into_iter()
    .map(|(name, url)| FeedSource {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
});

static DEFAULT_KEYWORDS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Trento",
        "Bolzano",
        "Val di Non",
        "Val Pusteria",
        "Pergine",
        "Trentino",
        "Alto Adige",
        "autonomia",
        "sanità",
        "università",
        "energia",
        "trasporti",
        "innovazione",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
});

fn default_feeds() -> Vec<FeedSource> {
    DEFAULT_FEEDS.clone()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.clone()
}

/// Load an [`AppConfig`] from a YAML file.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

fn parse_config(text: &str) -> Result<AppConfig, Box<dyn Error>> {
    Ok(serde_yaml::from_str(text)?)
}
