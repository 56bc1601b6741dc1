//! The generic extractor: template cascade, then a broad news-element
//! sweep, then the regex fallback.

use tracing::debug;

use crate::Result;
use crate::categories;
use crate::dates;
use crate::extract::extract_with_templates;
use crate::fallback;
use crate::item::AnnouncementItem;
use crate::parse::{Document, Element};
use crate::siteconfig::SiteConfig;

use super::Extractor;

/// Selector for elements that commonly wrap announcement entries.
const NEWS_ELEMENTS: &str = "article, .news-item, .notice, .announcement, .post, .entry, \
     div[class*=\"news\"], div[class*=\"notice\"], div[class*=\"announcement\"]";

/// Looser second sweep when nothing announcement-shaped exists.
const LIST_ELEMENTS: &str = "ul li, div.row, div.list-item";

/// Minimum text length for a bare dated paragraph to count as an entry.
const PARAGRAPH_MIN_LEN: usize = 50;

/// Default extractor for URLs without a specialized implementation.
pub struct Generic;

impl Extractor for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _url: &str) -> bool {
        true
    }

    fn extract(&self, markup: &str, url: &str, site: &SiteConfig) -> Result<Vec<AnnouncementItem>> {
        let doc = Document::parse(markup)?;

        let items = extract_with_templates(&doc, url, &site.templates)?;
        if !items.is_empty() {
            return Ok(items);
        }

        let items = news_element_sweep(&doc, url)?;
        if !items.is_empty() {
            return Ok(items);
        }

        debug!(url, "no structural match, using regex fallback");
        Ok(fallback::extract(markup, url))
    }
}

/// Sweeps announcement-shaped elements with progressively looser selectors
/// and builds one item per dated element.
fn news_element_sweep(doc: &Document, url: &str) -> Result<Vec<AnnouncementItem>> {
    let mut elements = doc.select(NEWS_ELEMENTS)?;
    if elements.is_empty() {
        elements = doc.select(LIST_ELEMENTS)?;
    }
    if elements.is_empty() {
        elements = doc
            .select("p")?
            .into_iter()
            .filter(|p| {
                let text = p.text();
                text.chars().count() > PARAGRAPH_MIN_LEN && dates::scan(&text).is_some()
            })
            .collect();
    }

    let mut items = Vec::new();
    for element in &elements {
        if let Some(item) = item_from_element(element, url)? {
            items.push(item);
        }
    }
    Ok(items)
}

fn item_from_element(element: &Element<'_>, url: &str) -> Result<Option<AnnouncementItem>> {
    let content = element.text();

    let date_text = element
        .select_first("time, .date, [class*=\"date\"], .time, [class*=\"time\"]")?
        .map(|el| el.attr("datetime").map(|d| d.to_string()).unwrap_or_else(|| el.text()));

    let date = date_text
        .as_deref()
        .and_then(|text| dates::scan_with_hint(text, None))
        .or_else(|| dates::scan(&content));
    let date = match date {
        Some(d) => d,
        None => return Ok(None),
    };

    let title = element
        .select_first("h1, h2, h3, h4, .title, [class*=\"title\"]")?
        .map(|el| el.text())
        .unwrap_or_default();

    let link = element.resolve_link(url);
    let labels = categories::classify(&format!("{} {}", title, content), &element.classes());

    Ok(Some(AnnouncementItem::new(title, link, content, dates::to_timestamp(date), labels)))
}
