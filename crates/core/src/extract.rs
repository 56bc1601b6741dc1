//! The extraction strategy cascade.
//!
//! Given parsed markup and an ordered list of [`SelectorTemplate`]s, the
//! cascade tries each template in turn and stops at the first one that
//! yields at least one item — greedy, not best-of. Within a matched
//! container each field has a heuristic fallback chain: dates fall back
//! from a sub-selector (honoring `datetime` attributes) to a regex scan of
//! the container text, titles to a truncated content prefix, links to the
//! source page URL, content to the full container text.
//!
//! A container in which no date-shaped text can be found at all is
//! skipped; the regex fallback extractor (see the `fallback` module) is
//! the one path that retains undated entries.

use tracing::debug;

use crate::categories;
use crate::dates;
use crate::item::AnnouncementItem;
use crate::parse::{Document, Element};
use crate::siteconfig::{SelectorTemplate, SiteConfig};
use crate::Result;

/// Extracts announcement items from raw markup using a site's templates.
///
/// Parses the markup and runs [`extract_with_templates`]; an empty result
/// is not an error.
pub fn extract_announcements(markup: &str, source_url: &str, site: &SiteConfig) -> Result<Vec<AnnouncementItem>> {
    let doc = Document::parse(markup)?;
    extract_with_templates(&doc, source_url, &site.templates)
}

/// Runs the template cascade over a parsed document.
///
/// Templates are tried in order; the first producing a non-empty item list
/// wins. Zero matching containers for every template yields an empty list,
/// never an error. Malformed selector strings do error, since they are a
/// configuration defect rather than a property of the page.
pub fn extract_with_templates(
    doc: &Document, source_url: &str, templates: &[SelectorTemplate],
) -> Result<Vec<AnnouncementItem>> {
    for (index, template) in templates.iter().enumerate() {
        let containers = doc.select(&template.container)?;
        if containers.is_empty() {
            debug!(template = index, container = %template.container, "no containers, next template");
            continue;
        }

        let mut items = Vec::new();
        for container in &containers {
            if let Some(item) = item_from_container(container, source_url, template)? {
                items.push(item);
            }
        }

        if !items.is_empty() {
            debug!(template = index, count = items.len(), "template matched");
            return Ok(items);
        }
    }

    Ok(Vec::new())
}

/// Builds one item from a matched container, or `None` when the container
/// has no recognizable date.
fn item_from_container(
    container: &Element<'_>, source_url: &str, template: &SelectorTemplate,
) -> Result<Option<AnnouncementItem>> {
    let container_text = container.text();

    // Date: sub-selector first (datetime attribute preferred over display
    // text), then a regex scan of the whole container.
    let date_text = match &template.date {
        Some(selector) => container
            .select_first(selector)?
            .map(|el| el.attr("datetime").map(|d| d.to_string()).unwrap_or_else(|| el.text())),
        None => None,
    };

    let date = date_text
        .as_deref()
        .and_then(|text| dates::scan_with_hint(text, None))
        .or_else(|| dates::scan(&container_text));

    let date = match date {
        Some(d) => d,
        None => {
            debug!(container = %template.container, "container skipped, no date found");
            return Ok(None);
        }
    };

    let title = match &template.title {
        Some(selector) => container.select_first(selector)?.map(|el| el.text()).unwrap_or_default(),
        None => String::new(),
    };

    let content = match &template.content {
        Some(selector) => container
            .select_first(selector)?
            .map(|el| el.text())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| container_text.clone()),
        None => container_text.clone(),
    };

    let link = container.resolve_link(source_url);

    // Structural hints: the container's own classes plus those of the
    // category badge, whose display text also seeds the category set.
    let mut hints = container.classes();
    let mut categories = Vec::new();
    if let Some(selector) = &template.category {
        if let Some(badge) = container.select_first(selector)? {
            hints.extend(badge.classes());
            let badge_text = badge.text();
            if !badge_text.is_empty() {
                categories.push(badge_text);
            }
        }
    }
    let detected = categories::classify(&format!("{} {}", title, content), &hints);
    if categories.is_empty() {
        categories = detected;
    } else {
        // The sentinel only applies when the whole set would be empty.
        categories.extend(detected.into_iter().filter(|c| c != crate::item::OTHER_CATEGORY));
    }

    Ok(Some(AnnouncementItem::new(title, link, content, dates::to_timestamp(date), categories)))
}

/// Keeps whichever fetch method produced more items.
///
/// A cheap proxy for "more complete": when a rendering-capable fetch and a
/// static fetch are both available, extraction runs against each and the
/// larger result set wins. Ties prefer the rendered result — a policy
/// preference, not a correctness requirement.
pub fn prefer_richer(
    rendered: Vec<AnnouncementItem>, static_items: Vec<AnnouncementItem>,
) -> Vec<AnnouncementItem> {
    if static_items.len() > rendered.len() { static_items } else { rendered }
}
