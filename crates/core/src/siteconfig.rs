//! Per-site scraping configuration.
//!
//! Each supported source page gets a [`SiteConfig`]: whether the page needs
//! a rendering pass before its markup is useful, how long to wait for that
//! pass, the minimum item count below which a yield is considered
//! suspicious, and the ordered list of selector templates the extraction
//! cascade will try.
//!
//! The registry is a compiled-in table with process lifetime. Lookup falls
//! back from an exact URL match to substring containment (in either
//! direction) to a generic default, so [`lookup`] is total.

use std::time::Duration;

use once_cell::sync::Lazy;

/// One structural matching rule for the extraction cascade.
///
/// `container` is required; the sub-selectors are optional and each has a
/// heuristic fallback in the cascade (regex date scan, content prefix
/// title, full container text).
#[derive(Debug, Clone)]
pub struct SelectorTemplate {
    /// Selector for the repeated announcement container.
    pub container: String,
    /// Selector for the date element inside a container.
    pub date: Option<String>,
    /// Selector for the title element inside a container.
    pub title: Option<String>,
    /// Selector for the body element inside a container.
    pub content: Option<String>,
    /// Selector for a category badge or tag inside a container.
    pub category: Option<String>,
}

impl SelectorTemplate {
    /// Creates a template with only a container selector.
    pub fn new(container: &str) -> Self {
        Self { container: container.to_string(), date: None, title: None, content: None, category: None }
    }

    pub fn date(mut self, selector: &str) -> Self {
        self.date = Some(selector.to_string());
        self
    }

    pub fn title(mut self, selector: &str) -> Self {
        self.title = Some(selector.to_string());
        self
    }

    pub fn content(mut self, selector: &str) -> Self {
        self.content = Some(selector.to_string());
        self
    }

    pub fn category(mut self, selector: &str) -> Self {
        self.category = Some(selector.to_string());
        self
    }
}

/// Wait durations handed to the rendering port.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    /// Maximum time to wait for the page's dynamic content to appear.
    pub render_wait: Duration,
    /// Additional settle time after the wait condition is met.
    pub post_load_wait: Duration,
}

/// Read-only configuration for one source page.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Human-readable source name, used in logs and the feed channel title.
    pub name: String,
    /// Configured target URL; empty for the generic default.
    pub url: String,
    /// Whether static markup is useless without a rendering pass.
    pub requires_rendering: bool,
    /// Maximum rendering wait.
    pub render_wait: Duration,
    /// Settle time after rendering.
    pub post_load_wait: Duration,
    /// Yields below this count log a warning but do not fail the run.
    pub min_items: usize,
    /// Ordered selector templates for the cascade.
    pub templates: Vec<SelectorTemplate>,
}

impl SiteConfig {
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy { render_wait: self.render_wait, post_load_wait: self.post_load_wait }
    }
}

/// Template cascade used when no site-specific configuration applies.
///
/// Ordered from the most common announcement layouts (article lists) down
/// to table rows and card grids.
pub fn generic_templates() -> Vec<SelectorTemplate> {
    vec![
        SelectorTemplate::new("article").date("time").title("h2, h3").content("p, div.content"),
        SelectorTemplate::new("div.release, div.announcement, li.release-item")
            .date("time, span.date")
            .title("h3, h4, strong")
            .content("p, div.description"),
        SelectorTemplate::new("tr").date("td:first-child").title("td h3, td strong").content("td p"),
        SelectorTemplate::new("div.card, div.release-card")
            .date("span.date, div.date")
            .title("h3, div.title")
            .content("div.content, p"),
    ]
}

fn monaca_templates() -> Vec<SelectorTemplate> {
    vec![
        SelectorTemplate::new(".headline-entry")
            .date(".headline-entry-date")
            .category(".headline-entry-type-badge")
            .content(".headline-entry-content"),
        SelectorTemplate::new(".news-item, article.news-item")
            .date(".date, time, .news-date")
            .category(".badge, .category, .news-category")
            .content(".content, .news-content, .description")
            .title("a, h1, h2, h3, .title"),
        SelectorTemplate::new("article")
            .date("time, .date, .published")
            .category(".badge, .tag, .category")
            .content(".content, .body, p")
            .title("a, h1, h2, h3, h4, .title"),
        SelectorTemplate::new(".entry, .post")
            .date(".date, time, .entry-date")
            .category(".category, .tag")
            .content(".entry-content, .post-content")
            .title("h1, h2, h3, .title, a"),
    ]
}

static CONFIGS: Lazy<Vec<SiteConfig>> = Lazy::new(|| {
    vec![
        SiteConfig {
            name: "Monaca Headline".to_string(),
            url: "https://ja.monaca.io/headline/".to_string(),
            requires_rendering: true,
            render_wait: Duration::from_secs(20),
            post_load_wait: Duration::from_secs(8),
            min_items: 2,
            templates: monaca_templates(),
        },
        SiteConfig {
            name: "Firebase Release Notes".to_string(),
            url: "https://firebase.google.com/support/releases".to_string(),
            requires_rendering: false,
            render_wait: Duration::from_secs(5),
            post_load_wait: Duration::ZERO,
            min_items: 1,
            templates: vec![
                SelectorTemplate::new("article").date("time").title("h2, h3").content("p"),
                SelectorTemplate::new(".release-note").date("time, .date").title("h3").content("p"),
            ],
        },
    ]
});

/// The fallback configuration for unrecognized URLs.
pub fn default_config() -> SiteConfig {
    SiteConfig {
        name: "Generic".to_string(),
        url: String::new(),
        requires_rendering: false,
        render_wait: Duration::from_secs(10),
        post_load_wait: Duration::from_secs(2),
        min_items: 1,
        templates: generic_templates(),
    }
}

/// Looks up the configuration for a URL.
///
/// Exact match first, then substring containment in either direction (so
/// both `https://ja.monaca.io/headline/?page=2` and a shortened form of a
/// configured URL resolve), then the generic default.
pub fn lookup(url: &str) -> SiteConfig {
    if let Some(config) = CONFIGS.iter().find(|c| c.url == url) {
        return config.clone();
    }

    if !url.is_empty() {
        if let Some(config) = CONFIGS.iter().find(|c| url.contains(&c.url) || c.url.contains(url)) {
            return config.clone();
        }
    }

    default_config()
}

/// URLs of all configured target pages, in registry order.
pub fn configured_targets() -> Vec<String> {
    CONFIGS.iter().map(|c| c.url.clone()).collect()
}
