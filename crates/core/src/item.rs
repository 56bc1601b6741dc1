//! The canonical announcement record produced by every extractor.
//!
//! An [`AnnouncementItem`] is constructed once during extraction and never
//! mutated afterwards; filtering and rendering only select items or derive
//! other representations from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters taken from the body when a title has to be
/// synthesized from it.
const TITLE_PREFIX_LEN: usize = 50;

/// Sentinel used for fields whose value could not be determined.
pub const UNKNOWN: &str = "不明";

/// Category guaranteed to be present when no keyword or hint matched.
pub const OTHER_CATEGORY: &str = "Other";

/// A single announcement, release note, or headline entry.
///
/// Invariants enforced by [`AnnouncementItem::new`]:
///
/// - `title` is never empty (synthesized from the description prefix,
///   falling back to [`UNKNOWN`]).
/// - `categories` is never empty (at least [`OTHER_CATEGORY`]) and contains
///   no case-insensitive duplicates.
/// - `updated_at` defaults to `published_at`.
/// - `guid` is derived from the link plus a content fingerprint; unique
///   enough within one scrape run, not globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementItem {
    /// Headline text of the announcement.
    pub title: String,
    /// Absolute URL of the announcement, or the source page URL when no
    /// anchor was found.
    pub link: String,
    /// Plain-text body with HTML stripped.
    pub description: String,
    /// Publication timestamp (normalized; see the `dates` module).
    pub published_at: DateTime<Utc>,
    /// Last-update timestamp; equals `published_at` unless a separate
    /// update date was found.
    pub updated_at: DateTime<Utc>,
    /// Deduplicated category labels; never empty.
    pub categories: Vec<String>,
    /// Dedup key: link plus content fingerprint.
    pub guid: String,
}

impl AnnouncementItem {
    /// Builds an item, enforcing the record invariants.
    pub fn new(
        title: impl Into<String>, link: impl Into<String>, description: impl Into<String>,
        published_at: DateTime<Utc>, categories: Vec<String>,
    ) -> Self {
        let link = link.into();
        let description = description.into();
        let title = synthesize_title(title.into(), &description);
        let categories = dedup_categories(categories);
        let guid = make_guid(&link, &title, published_at, &description);

        Self { title, link, description, published_at, updated_at: published_at, categories, guid }
    }

    /// Sets a distinct update timestamp.
    pub fn with_updated(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

impl std::fmt::Display for AnnouncementItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.published_at.format("%Y-%m-%d"), self.title)
    }
}

fn synthesize_title(title: String, description: &str) -> String {
    let trimmed = title.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    let body = description.trim();
    if body.is_empty() {
        return UNKNOWN.to_string();
    }

    if body.chars().count() > TITLE_PREFIX_LEN {
        let prefix: String = body.chars().take(TITLE_PREFIX_LEN).collect();
        format!("{}...", prefix)
    } else {
        body.to_string()
    }
}

/// Removes case-insensitive duplicates, keeping first occurrences in order,
/// and substitutes the sentinel when nothing remains.
fn dedup_categories(categories: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for category in categories {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        out.push(trimmed.to_string());
    }

    if out.is_empty() {
        out.push(OTHER_CATEGORY.to_string());
    }
    out
}

fn make_guid(link: &str, title: &str, published_at: DateTime<Utc>, description: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(published_at.format("%Y-%m-%d").to_string().as_bytes());
    hasher.update(description.as_bytes());
    let digest = hasher.finalize();

    let mut fingerprint = String::with_capacity(16);
    for b in digest.iter().take(8) {
        use std::fmt::Write as _;
        let _ = write!(&mut fingerprint, "{:02x}", b);
    }

    format!("{}#{}", link, fingerprint)
}
