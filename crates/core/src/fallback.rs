//! Regex-based fallback extraction.
//!
//! Used when no structural template matches (or no parse is worth
//! attempting): headings and list items are located with regular
//! expressions over the raw markup and items are reconstructed from text
//! windows around them. This trades precision for resilience — it works on
//! malformed or partial markup where a tree parser gives up.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::categories;
use crate::dates;
use crate::item::{AnnouncementItem, UNKNOWN};

/// Raw-text window taken around each heading: bytes before / after the
/// heading position searched for a date and a paragraph.
const WINDOW_BEFORE: usize = 200;
const WINDOW_AFTER: usize = 500;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<h[23][^>]*>(.*?)</h[23]>").unwrap());

static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap());

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static SPAN_CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<span[^>]*class=["'](?:category|tag)["'][^>]*>(.*?)</span>"#).unwrap());

/// Date-shaped substring, all supported separators in one pattern. Used
/// positionally: within a window the first occurrence wins, regardless of
/// which form it takes.
static DATE_SHAPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2}[-/.年]\s*\d{1,2}[-/.月]\s*\d{1,2}日?").unwrap());

static DATED_LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)<li[^>]*>.*?(20\d{2}[-/.年]\s*\d{1,2}[-/.月]\s*\d{1,2}日?).*?<(?:strong|b|span)[^>]*>(.*?)</(?:strong|b|span)>.*?</li>",
    )
    .unwrap()
});

/// Extracts approximate items from raw markup without a DOM parse.
///
/// Two independent passes, results concatenated:
///
/// 1. Every `<h2>`/`<h3>` heading becomes an item; the surrounding text
///    window supplies a date (defaulting to the current time when absent —
///    this is the one path that retains undated entries) and a paragraph
///    for the body.
/// 2. Every `<li>` containing both a date-shaped substring and a
///    bold/strong/span-wrapped substring becomes an item; here both the
///    date and the title capture are required.
pub fn extract(markup: &str, source_url: &str) -> Vec<AnnouncementItem> {
    let mut items = heading_pass(markup, source_url);
    items.extend(list_item_pass(markup, source_url));

    debug!(count = items.len(), "regex fallback extraction finished");
    items
}

fn heading_pass(markup: &str, source_url: &str) -> Vec<AnnouncementItem> {
    let mut items = Vec::new();

    for caps in HEADING.captures_iter(markup) {
        let title = strip_tags(&caps[1]);
        if title.is_empty() {
            continue;
        }

        let window = text_window(markup, caps.get(0).map(|m| m.start()).unwrap_or(0));

        let published_at = match DATE_SHAPED.find(window).and_then(|m| dates::scan(m.as_str())) {
            Some(date) => dates::to_timestamp(date),
            None => Utc::now(),
        };

        let content = PARAGRAPH
            .captures(window)
            .map(|c| strip_tags(&c[1]))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut labels: Vec<String> = SPAN_CATEGORY
            .captures_iter(window)
            .map(|c| strip_tags(&c[1]))
            .filter(|text| !text.is_empty())
            .collect();
        labels.extend(
            categories::classify(&format!("{} {}", title, content), &[])
                .into_iter()
                .filter(|c| c != crate::item::OTHER_CATEGORY),
        );

        items.push(AnnouncementItem::new(title, source_url, content, published_at, labels));
    }

    items
}

fn list_item_pass(markup: &str, source_url: &str) -> Vec<AnnouncementItem> {
    let mut items = Vec::new();

    for caps in DATED_LIST_ITEM.captures_iter(markup) {
        let date = match dates::scan(&caps[1]) {
            Some(date) => date,
            None => continue,
        };
        let title = strip_tags(&caps[2]);
        if title.is_empty() {
            continue;
        }

        let whole = &caps[0];
        let content = PARAGRAPH
            .captures(whole)
            .map(|c| strip_tags(&c[1]))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        items.push(AnnouncementItem::new(title, source_url, content, dates::to_timestamp(date), vec![]));
    }

    items
}

/// Byte window around `pos`, clamped to character boundaries.
fn text_window(markup: &str, pos: usize) -> &str {
    let mut start = pos.saturating_sub(WINDOW_BEFORE);
    let mut end = usize::min(markup.len(), pos + WINDOW_AFTER);
    while start > 0 && !markup.is_char_boundary(start) {
        start -= 1;
    }
    while end < markup.len() && !markup.is_char_boundary(end) {
        end += 1;
    }
    &markup[start..end]
}

fn strip_tags(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
