//! Utility functions for text shortening and file system checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Placeholder appended to summaries that had to be cut.
const PLACEHOLDER: &str = " [...]";

/// Shorten a text to fit in `width` characters, breaking on word
/// boundaries only.
///
/// Whitespace runs are first collapsed to single spaces. If the collapsed
/// text fits in `width` it is returned unchanged; otherwise words are kept
/// as long as the result, *including* the ` [...]` placeholder, stays
/// within `width`. A word is never split. If not even the first word fits,
/// the placeholder alone (without its leading space) is returned.
///
/// Widths are counted in characters, not bytes, so accented Italian text
/// truncates correctly.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(shorten("Hello  world", 80), "Hello world");
/// assert_eq!(shorten("The quick brown fox", 12), "The [...]");
/// ```
pub fn shorten(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.chars().count());
    let mut kept = String::new();
    let mut kept_chars = 0usize;
    for word in collapsed.split(' ') {
        let word_chars = word.chars().count();
        let sep = if kept.is_empty() { 0 } else { 1 };
        if kept_chars + sep + word_chars > budget {
            break;
        }
        if sep == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
        kept_chars += sep + word_chars;
    }

    if kept.is_empty() {
        return PLACEHOLDER.trim_start().to_string();
    }
    kept.push_str(PLACEHOLDER);
    kept
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file. Failing here aborts
/// the run before any feed is fetched, since there would be nowhere to
/// write the digest.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Small sync probe write, simpler error surface than async here.
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
