//! The per-URL scrape pipeline.
//!
//! Strictly sequential: optional rendering pass, static fetch, independent
//! extraction against each markup source, then a richer-wins merge. All
//! failure handling here is about degrading gracefully — a failed render
//! falls back to the static fetch, a failed static fetch keeps the
//! rendered result, and only both failing aborts the URL.

use tracing::{info, warn};

use crate::Result;
use crate::extract::prefer_richer;
use crate::extractors::{Extractor, Registry};
use crate::fetch::{FetchConfig, PageRenderer, fetch_url};
use crate::item::AnnouncementItem;
use crate::siteconfig::{self, SiteConfig};

/// Scrapes one URL end to end, returning the merged item list.
///
/// Site configuration and extractor are resolved from the URL; see
/// [`scrape_with_config`] for the pipeline itself.
pub async fn scrape_url(
    url: &str, registry: &Registry, renderer: &dyn PageRenderer, config: &FetchConfig,
) -> Result<Vec<AnnouncementItem>> {
    let site = siteconfig::lookup(url);
    let extractor = registry.resolve(url);
    scrape_with_config(url, &site, extractor, renderer, config).await
}

/// The scrape pipeline with explicit collaborators.
///
/// An empty result is not an error; the caller decides whether zero items
/// is fatal for its run. Yields below the site's configured minimum only
/// log a warning.
pub async fn scrape_with_config(
    url: &str, site: &SiteConfig, extractor: &dyn Extractor, renderer: &dyn PageRenderer,
    config: &FetchConfig,
) -> Result<Vec<AnnouncementItem>> {
    info!(url, site = %site.name, extractor = extractor.name(), "scraping");

    let rendered_markup = if site.requires_rendering {
        match renderer.render(url, &site.wait_policy()).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(url, error = %e, "rendering failed, falling back to static fetch");
                None
            }
        }
    } else {
        None
    };

    let rendered_items = match &rendered_markup {
        Some(markup) => extractor.extract(markup, url, site)?,
        None => Vec::new(),
    };

    let static_items = match fetch_url(url, config).await {
        Ok(markup) => extractor.extract(&markup, url, site)?,
        Err(e) => {
            if rendered_markup.is_none() {
                return Err(e);
            }
            warn!(url, error = %e, "static fetch failed, keeping rendered result");
            Vec::new()
        }
    };

    let items = prefer_richer(rendered_items, static_items);

    if items.is_empty() {
        warn!(url, "no items extracted");
    } else if items.len() < site.min_items {
        warn!(
            url,
            count = items.len(),
            min_items = site.min_items,
            "suspiciously low yield"
        );
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::MonacaHeadline;
    use crate::fetch::NullRenderer;
    use crate::siteconfig::WaitPolicy;
    use async_trait::async_trait;

    struct FixtureRenderer(&'static str);

    #[async_trait]
    impl PageRenderer for FixtureRenderer {
        async fn render(&self, _url: &str, _wait: &WaitPolicy) -> Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    struct BrokenRenderer;

    #[async_trait]
    impl PageRenderer for BrokenRenderer {
        async fn render(&self, _url: &str, wait: &WaitPolicy) -> Result<Option<String>> {
            Err(crate::Error::RenderTimeout { wait: wait.render_wait.as_secs() })
        }
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(fut)
    }

    /// Monaca-shaped site config pointing at an unreachable local port, so
    /// the static fetch fails fast without touching the network.
    fn unreachable_site() -> SiteConfig {
        SiteConfig { requires_rendering: true, ..siteconfig::lookup("https://ja.monaca.io/headline/") }
    }

    const RENDERED: &str = r#"
        <div class="headline-entry">
            <span class="headline-entry-date">2025年4月17日</span>
            <div class="headline-entry-content">レンダリング済みのお知らせ。</div>
        </div>
    "#;

    #[test]
    fn test_invalid_url_is_rejected() {
        let registry = Registry::with_defaults();
        let config = FetchConfig::default();
        let result = block_on(scrape_url("not a url", &registry, &NullRenderer, &config));

        assert!(matches!(result, Err(crate::Error::InvalidUrl(_))));
    }

    #[test]
    fn test_rendered_result_survives_static_fetch_failure() {
        let config = FetchConfig { timeout: 2, ..Default::default() };
        let result = block_on(scrape_with_config(
            "http://127.0.0.1:1/headline/",
            &unreachable_site(),
            &MonacaHeadline,
            &FixtureRenderer(RENDERED),
            &config,
        ));

        let items = result.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].description.contains("レンダリング済み"));
    }

    #[test]
    fn test_both_fetch_methods_failing_aborts_url() {
        let config = FetchConfig { timeout: 2, ..Default::default() };
        let result = block_on(scrape_with_config(
            "http://127.0.0.1:1/headline/",
            &unreachable_site(),
            &MonacaHeadline,
            &BrokenRenderer,
            &config,
        ));

        assert!(result.is_err());
    }
}
