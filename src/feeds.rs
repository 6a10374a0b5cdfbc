//! Feed fetching and keyword filtering.
//!
//! Each configured source is fetched and filtered independently, in
//! configured order, one at a time. A source that fails to download or
//! parse contributes zero items and an error message; it never aborts the
//! run. There is exactly one attempt per feed, no retry.

use crate::config::AppConfig;
use crate::models::{NewsItem, SourceFetch};
use futures::stream::{self, StreamExt};
use rss::Channel;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Timeout applied to each feed request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by all feed requests.
pub fn build_client() -> Result<reqwest::Client, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("rassegna_trentino/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fetch one feed and keep the entries that match the keyword list.
///
/// The URL is validated, downloaded with the shared client, and parsed as
/// RSS. Non-2xx responses are errors. Entry fields that the feed omits get
/// their documented defaults: empty title/summary/link, `"N/D"` for the
/// publication date.
#[instrument(level = "info", skip_all, fields(source = %source, url = %url))]
pub async fn fetch_source(
    client: &reqwest::Client,
    source: &str,
    url: &str,
    keywords: &[String],
) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let feed_url = Url::parse(url)?;
    let body = client
        .get(feed_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let channel = Channel::read_from(&body[..])?;

    let total = channel.items().len();
    let items = filter_channel(&channel, source, keywords);
    info!(matched = items.len(), total, "Filtered feed entries");
    Ok(items)
}

/// Convert a parsed channel into [`NewsItem`]s, keeping only keyword
/// matches. Entries keep their feed order.
pub fn filter_channel(channel: &Channel, source: &str, keywords: &[String]) -> Vec<NewsItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title().unwrap_or_default();
            let summary = item.description().unwrap_or_default();
            if !entry_matches(title, summary, keywords) {
                return None;
            }
            Some(NewsItem {
                source: source.to_string(),
                title: title.to_string(),
                link: item.link().unwrap_or_default().to_string(),
                summary: summary.to_string(),
                published: item.pub_date().unwrap_or("N/D").to_string(),
            })
        })
        .collect()
}

/// Case-insensitive substring test against title and summary.
pub fn entry_matches(title: &str, summary: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    let summary = summary.to_lowercase();
    keywords.iter().any(|kw| {
        let kw = kw.to_lowercase();
        title.contains(&kw) || summary.contains(&kw)
    })
}

/// Fetch every configured source sequentially, in configured order.
///
/// Returns one [`SourceFetch`] per source, success or failure, in the same
/// order as the configuration. Errors are captured as values here; the
/// caller decides how to report them.
#[instrument(level = "info", skip_all, fields(sources = config.feeds.len()))]
pub async fn fetch_all(client: &reqwest::Client, config: &AppConfig) -> Vec<SourceFetch> {
    stream::iter(config.feeds.iter())
        .then(|feed| async move {
            debug!(source = %feed.name, "Fetching feed");
            match fetch_source(client, &feed.name, &feed.url, &config.keywords).await {
                Ok(items) => SourceFetch {
                    source: feed.name.clone(),
                    outcome: Ok(items),
                },
                Err(e) => SourceFetch {
                    source: feed.name.clone(),
                    outcome: Err(e.to_string()),
                },
            }
        })
        .collect()
        .await
}

/// Concatenate the successful outcomes in source order.
pub fn merge(fetches: Vec<SourceFetch>) -> Vec<NewsItem> {
    fetches
        .into_iter()
        .filter_map(|fetch| fetch.outcome.ok())
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedSource;
    use httpmock::prelude::*;

    const FIXTURE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Testata di prova</title>
    <link>https://example.com</link>
    <description>feed di prova</description>
    <item>
      <title>Nuovi fondi per la sanità a Trento</title>
      <link>https://example.com/sanita-trento</link>
      <description>Il consiglio provinciale approva il piano.</description>
      <pubDate>Mon, 05 May 2025 08:00:00 +0200</pubDate>
    </item>
    <item>
      <title>Meteo: sole su tutta la regione</title>
      <link>https://example.com/meteo</link>
      <description>Previsioni per il fine settimana.</description>
      <pubDate>Mon, 05 May 2025 09:00:00 +0200</pubDate>
    </item>
    <item>
      <title>Nessun titolo utile</title>
      <link>https://example.com/energia</link>
      <description>Nuovo piano energia per i comuni.</description>
    </item>
  </channel>
</rss>"#;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_entry_matches_is_case_insensitive() {
        let kws = keywords(&["trento"]);
        assert!(entry_matches("Nuovi fondi per la sanità a TRENTO", "", &kws));
        assert!(entry_matches("", "Se ne parla a Trento", &kws));
        assert!(!entry_matches("Meteo: sole su tutta la regione", "", &kws));
    }

    #[test]
    fn test_entry_matches_summary_only() {
        let kws = keywords(&["autonomia"]);
        assert!(entry_matches(
            "Dibattito in consiglio",
            "Il tema dell'Autonomia torna in aula",
            &kws
        ));
    }

    #[test]
    fn test_entry_matches_no_keywords_excludes_everything() {
        assert!(!entry_matches("Trento", "Trento", &[]));
    }

    #[test]
    fn test_filter_channel_keeps_only_matches() {
        let channel = Channel::read_from(FIXTURE_FEED.as_bytes()).unwrap();
        let items = filter_channel(&channel, "Testata", &keywords(&["Trento", "energia"]));

        let titles: Vec<&str> = items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Nuovi fondi per la sanità a Trento", "Nessun titolo utile"]
        );
        assert!(items.iter().all(|n| n.source == "Testata"));
    }

    #[test]
    fn test_filter_channel_missing_pub_date_becomes_nd() {
        let channel = Channel::read_from(FIXTURE_FEED.as_bytes()).unwrap();
        let items = filter_channel(&channel, "Testata", &keywords(&["energia"]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].published, "N/D");
        assert_eq!(items[0].link, "https://example.com/energia");
    }

    #[test]
    fn test_filter_channel_missing_description_matches_on_title() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>t</title><link>https://example.com</link><description>d</description>
    <item>
      <title>Trasporti, nuova linea per Pergine</title>
    </item>
  </channel>
</rss>"#;
        let channel = Channel::read_from(feed.as_bytes()).unwrap();
        let items = filter_channel(&channel, "Testata", &keywords(&["Pergine"]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary, "");
        assert_eq!(items[0].link, "");
        assert_eq!(items[0].published, "N/D");
    }

    #[test]
    fn test_merge_drops_failed_sources() {
        let fetches = vec![
            SourceFetch {
                source: "a".to_string(),
                outcome: Ok(vec![NewsItem {
                    source: "a".to_string(),
                    title: "t".to_string(),
                    link: String::new(),
                    summary: String::new(),
                    published: "N/D".to_string(),
                }]),
            },
            SourceFetch {
                source: "b".to_string(),
                outcome: Err("boom".to_string()),
            },
        ];

        let items = merge(fetches);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "a");
    }

    #[tokio::test]
    async fn test_fetch_source_rejects_http_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rss");
                then.status(500);
            })
            .await;

        let client = build_client().unwrap();
        let result = fetch_source(&client, "Rotta", &server.url("/rss"), &keywords(&["Trento"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_source_rejects_invalid_url() {
        let client = build_client().unwrap();
        let result = fetch_source(&client, "Rotta", "non è un url", &keywords(&["Trento"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failing_source() {
        let server = MockServer::start_async().await;
        let good = server
            .mock_async(|when, then| {
                when.method(GET).path("/buona.xml");
                then.status(200)
                    .header("content-type", "application/rss+xml")
                    .body(FIXTURE_FEED);
            })
            .await;
        let bad = server
            .mock_async(|when, then| {
                when.method(GET).path("/rotta.xml");
                then.status(503);
            })
            .await;

        let config = AppConfig {
            feeds: vec![
                FeedSource {
                    name: "Buona".to_string(),
                    url: server.url("/buona.xml"),
                },
                FeedSource {
                    name: "Rotta".to_string(),
                    url: server.url("/rotta.xml"),
                },
            ],
            keywords: keywords(&["Trento"]),
        };

        let client = build_client().unwrap();
        let fetches = fetch_all(&client, &config).await;

        // Configured order is preserved, and the broken source is a
        // contained error rather than a missing entry.
        assert_eq!(fetches.len(), 2);
        assert_eq!(fetches[0].source, "Buona");
        assert_eq!(fetches[1].source, "Rotta");
        assert!(fetches[1].outcome.is_err());

        let items = merge(fetches);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Nuovi fondi per la sanità a Trento");

        good.assert_async().await;
        bad.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_all_with_no_feeds_is_empty() {
        let config = AppConfig {
            feeds: vec![],
            keywords: keywords(&["Trento"]),
        };
        let client = build_client().unwrap();
        let fetches = fetch_all(&client, &config).await;
        assert!(fetches.is_empty());
    }
}
