//! Data models for collected news items and per-source fetch outcomes.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`NewsItem`]: one matching entry pulled from a feed
//! - [`SourceFetch`]: the outcome of fetching a single configured source
//!
//! It also owns the ordering of the final digest ([`sort_digest`]).

/// A single news entry that matched the keyword filter.
///
/// One `NewsItem` is produced per matching feed entry and lives only for
/// the duration of the run. There is no identity beyond the field values
/// and no deduplication across sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// The configured label of the outlet the entry came from.
    pub source: String,
    /// The entry title.
    pub title: String,
    /// Link to the full article. Empty if the feed omitted it.
    pub link: String,
    /// The entry summary. Empty if the feed omitted it.
    pub summary: String,
    /// The publication date exactly as the feed supplied it, or `"N/D"`
    /// when the feed carried none. Never parsed.
    pub published: String,
}

/// The outcome of fetching one configured source.
///
/// A failing source is a value, not a crash: the error is carried here as
/// its rendered message and the run continues with the remaining sources.
#[derive(Debug)]
pub struct SourceFetch {
    /// The configured label of the source.
    pub source: String,
    /// The filtered items, or the fetch/parse error for this source.
    pub outcome: Result<Vec<NewsItem>, String>,
}

/// Sort the combined digest by `(source, published)`.
///
/// Both keys are compared as raw strings. The published date is whatever
/// text the feed supplied, so mixed date formats do not sort
/// chronologically; the ordering contract is lexical, and the sort is
/// stable so entries with equal keys keep their fetch order.
pub fn sort_digest(items: &mut [NewsItem]) {
    items.sort_by(|a, b| {
        (a.source.as_str(), a.published.as_str()).cmp(&(b.source.as_str(), b.published.as_str()))
    });
}
