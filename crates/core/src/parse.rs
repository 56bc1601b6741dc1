//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! extraction cascade: a thin wrapper over `scraper` that adds the
//! announcement-specific conveniences the extractors need — collapsed text
//! content, class-name hints, `datetime` attribute access, and link
//! resolution against the source page.
//!
//! # Example
//!
//! ```rust
//! use kawaraban_core::parse::Document;
//!
//! let html = r#"<article><h2>Title</h2><time datetime="2025-04-09">Apr 9</time></article>"#;
//! let doc = Document::parse(html).unwrap();
//! let articles = doc.select("article").unwrap();
//! assert_eq!(articles.len(), 1);
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::{Error, Result};

/// A parsed HTML page.
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: None })
    }

    /// Parses HTML with a base URL for resolving relative links.
    pub fn parse_with_base(html: &str, base_url: Option<Url>) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url })
    }

    /// The base URL used for link resolution, when one was provided.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Selector`] if the selector string is malformed.
    /// Selectors matching nothing return an empty vector.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// First element matching the selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Content of the `<title>` element.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let text = self.html.select(&selector).next().map(|el| collapse(el.text()))?;
        if text.is_empty() { None } else { Some(text) }
    }

    /// Content of the `meta[name="description"]` tag.
    pub fn meta_description(&self) -> Option<String> {
        let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
        self.html
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// All text content of the document, whitespace-collapsed.
    pub fn text_content(&self) -> String {
        collapse(self.html.root_element().text())
    }
}

/// A single element in the document tree.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Text content of this element and its descendants, with runs of
    /// whitespace collapsed to single spaces.
    pub fn text(&self) -> String {
        collapse(self.element.text())
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Class names of this element.
    pub fn classes(&self) -> Vec<String> {
        self.element.value().classes().map(|c| c.to_string()).collect()
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// First descendant matching the selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Next sibling that is an element, skipping text and comment nodes.
    pub fn next_sibling_element(&self) -> Option<Element<'a>> {
        self.element
            .next_siblings()
            .filter_map(scraper::ElementRef::wrap)
            .map(|el| Element { element: el })
            .next()
    }

    /// Resolves the `href` of the first descendant anchor against the page
    /// URL, falling back to `source_url` itself when no anchor is found or
    /// the href does not resolve.
    pub fn resolve_link(&self, source_url: &str) -> String {
        let anchor = match self.select_first("a") {
            Ok(Some(a)) => a,
            _ => return source_url.to_string(),
        };
        let href = match anchor.attr("href") {
            Some(h) => h,
            None => return source_url.to_string(),
        };

        match Url::parse(source_url).and_then(|base| base.join(href)) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => source_url.to_string(),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector(format!("{}: {}", selector, e)))
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined = parts.collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
