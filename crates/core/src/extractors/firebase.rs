//! Extractor for the Firebase release-notes page.
//!
//! The page interleaves `h2[id]` date headers (ids like `april_09_2025`)
//! with `h3[id]` product headers, each product followed by a `<ul>` of
//! release entries whose type is carried in a `release-*` class on a badge
//! span. One item is produced per list entry, dated by the preceding date
//! header.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::Result;
use crate::categories::{self, category_from_class};
use crate::dates;
use crate::item::AnnouncementItem;
use crate::parse::{Document, Element};
use crate::siteconfig::SiteConfig;

use super::Extractor;

static DATE_HEADER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+_\d+_\d{4}").unwrap());

const RELEASE_BADGE: &str = "span[class*=\"release-\"]";

/// Release-notes extractor for `firebase.google.com/support/releases`.
pub struct FirebaseReleases;

impl Extractor for FirebaseReleases {
    fn name(&self) -> &'static str {
        "firebase-releases"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("firebase.google.com")
    }

    fn extract(&self, markup: &str, url: &str, _site: &SiteConfig) -> Result<Vec<AnnouncementItem>> {
        let doc = Document::parse(markup)?;

        let items = header_walk(&doc, url)?;
        if !items.is_empty() {
            return Ok(items);
        }

        debug!(url, "no dated headers found, trying release list sections");
        release_list_sweep(&doc, url)
    }
}

/// Walks date and product headers in document order, collecting the list
/// entries under each product.
fn header_walk(doc: &Document, url: &str) -> Result<Vec<AnnouncementItem>> {
    let headers = doc.select("h2[id], h3[id]")?;

    let mut current_date: Option<NaiveDate> = None;
    let mut items = Vec::new();

    for header in &headers {
        let id = header.attr("id").unwrap_or("");

        match header.tag_name().as_str() {
            "h2" if DATE_HEADER_ID.is_match(id) => {
                current_date = dates::scan(&header.text());
            }
            "h3" => {
                let product = header.text();
                // Entries under a product header are only usable once a
                // date header has been seen.
                let Some(date) = current_date else { continue };
                let Some(list) = header.next_sibling_element().filter(|el| el.tag_name() == "ul") else {
                    continue;
                };

                for entry in list.select("li")? {
                    items.push(release_entry(&entry, &product, date, url, id)?);
                }
            }
            _ => {}
        }
    }

    Ok(items)
}

fn release_entry(
    entry: &Element<'_>, product: &str, date: NaiveDate, url: &str, header_id: &str,
) -> Result<AnnouncementItem> {
    let badge = entry.select_first(RELEASE_BADGE)?;

    let badge_classes = badge.as_ref().map(|b| b.classes()).unwrap_or_default();
    let release_type = badge_classes
        .iter()
        .find_map(|class| category_from_class(class))
        .unwrap_or_else(|| "other".to_string());

    // Strip the badge's own text from the entry body.
    let mut content = entry.text();
    if let Some(badge) = &badge {
        content = content.replacen(&badge.text(), "", 1).trim().to_string();
    }

    let title = format!("{} - {}", product, capitalize(&release_type));
    let link = format!("{}#{}", url, header_id);
    let labels = categories::classify(&format!("{} {}", title, content), &badge_classes);

    Ok(AnnouncementItem::new(title, link, content, dates::to_timestamp(date), labels))
}

/// Degraded path for markup without the dated header structure: scan the
/// article body's release lists directly, pulling a month-name date out of
/// each entry's own text when present.
fn release_list_sweep(doc: &Document, url: &str) -> Result<Vec<AnnouncementItem>> {
    let sections = doc.select(".changelog > ul > li, .devsite-article-body ul > li")?;

    let mut items = Vec::new();
    for entry in &sections {
        let badge = entry.select_first(RELEASE_BADGE)?;
        let badge_classes = badge.as_ref().map(|b| b.classes()).unwrap_or_default();
        let release_type = badge_classes
            .iter()
            .find_map(|class| category_from_class(class))
            .unwrap_or_else(|| "other".to_string());

        let mut content = entry.text();
        if let Some(badge) = &badge {
            content = content.replacen(&badge.text(), "", 1).trim().to_string();
        }

        let published_at = match dates::scan(&content) {
            Some(date) => dates::to_timestamp(date),
            None => Utc::now(),
        };

        let title = format!("Firebase Update - {}", capitalize(&release_type));
        let labels = categories::classify(&format!("{} {}", title, content), &badge_classes);

        items.push(AnnouncementItem::new(title, url, content, published_at, labels));
    }

    Ok(items)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siteconfig::lookup;
    use chrono::{TimeZone, Utc};

    const RELEASES_PAGE: &str = r#"
        <html><body>
            <h2 id="april_09_2025">April 09, 2025</h2>
            <h3 id="firebase-studio">Firebase Studio</h3>
            <ul>
                <li><span class="release-feature">feature</span> Added workspace sharing.</li>
                <li><span class="release-fixed">fixed</span> Crash on startup resolved.</li>
            </ul>
            <h3 id="firebase-auth">Firebase Authentication</h3>
            <ul>
                <li><span class="release-deprecated">deprecated</span> Legacy token API is deprecated.</li>
            </ul>
        </body></html>
    "#;

    fn extract(markup: &str) -> Vec<AnnouncementItem> {
        let url = "https://firebase.google.com/support/releases";
        FirebaseReleases.extract(markup, url, &lookup(url)).unwrap()
    }

    #[test]
    fn test_header_walk_items() {
        let items = extract(RELEASES_PAGE);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Firebase Studio - Feature");
        assert_eq!(items[2].title, "Firebase Authentication - Deprecated");
        for item in &items {
            assert_eq!(item.published_at, Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap());
        }
    }

    #[test]
    fn test_links_anchor_to_product_header() {
        let items = extract(RELEASES_PAGE);
        assert_eq!(items[0].link, "https://firebase.google.com/support/releases#firebase-studio");
        assert_eq!(items[2].link, "https://firebase.google.com/support/releases#firebase-auth");
    }

    #[test]
    fn test_release_class_drives_category() {
        let items = extract(RELEASES_PAGE);
        assert!(items[0].categories.iter().any(|c| c == "feature"));
        assert!(items[2].categories.iter().any(|c| c == "deprecated"));
    }

    #[test]
    fn test_badge_text_stripped_from_content() {
        let items = extract(RELEASES_PAGE);
        assert_eq!(items[0].description, "Added workspace sharing.");
    }

    #[test]
    fn test_product_without_preceding_date_skipped() {
        let markup = r#"
            <h3 id="firebase-studio">Firebase Studio</h3>
            <ul><li><span class="release-feature">feature</span> Undatable entry.</li></ul>
        "#;
        let doc = Document::parse(markup).unwrap();
        let items = header_walk(&doc, "https://firebase.google.com/support/releases").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_release_list_sweep_fallback() {
        let markup = r#"
            <div class="devsite-article-body">
                <ul>
                    <li><span class="release-changed">changed</span> Quota raised on April 2, 2025.</li>
                </ul>
            </div>
        "#;
        let items = extract(markup);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Firebase Update - Changed");
        assert_eq!(items[0].published_at, Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("feature"), "Feature");
        assert_eq!(capitalize(""), "");
    }
}
