//! Extractor for the Monaca headline page.
//!
//! The page is JavaScript-rendered; by the time markup reaches this
//! extractor it has ideally been through the rendering port. Entries are
//! matched with the site's template cascade, which starts at the page's
//! own `.headline-entry` structure and degrades through progressively more
//! generic layouts. The type badge on each entry seeds its category set.

use tracing::debug;

use crate::Result;
use crate::extract::extract_with_templates;
use crate::fallback;
use crate::item::AnnouncementItem;
use crate::parse::Document;
use crate::siteconfig::SiteConfig;

use super::Extractor;

/// Headline extractor for `ja.monaca.io/headline/`.
pub struct MonacaHeadline;

impl Extractor for MonacaHeadline {
    fn name(&self) -> &'static str {
        "monaca-headline"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("monaca.io")
    }

    fn extract(&self, markup: &str, url: &str, site: &SiteConfig) -> Result<Vec<AnnouncementItem>> {
        let doc = Document::parse(markup)?;

        let items = extract_with_templates(&doc, url, &site.templates)?;
        if !items.is_empty() {
            return Ok(items);
        }

        debug!(url, "headline templates all empty, using regex fallback");
        Ok(fallback::extract(markup, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siteconfig::lookup;
    use chrono::{TimeZone, Utc};

    const HEADLINE_PAGE: &str = r#"
        <html><body>
            <div class="headline-entries">
                <div class="headline-entry">
                    <span class="headline-entry-date">2025年4月17日</span>
                    <span class="headline-entry-type-badge">リリース</span>
                    <div class="headline-entry-content">
                        Monaca デバッガー 3.2.0 をリリースしました。
                    </div>
                </div>
                <div class="headline-entry">
                    <span class="headline-entry-date">2025年3月31日</span>
                    <span class="headline-entry-type-badge">重要</span>
                    <div class="headline-entry-content">
                        旧ビルド環境の提供終了について。
                    </div>
                </div>
            </div>
        </body></html>
    "#;

    fn extract(markup: &str) -> Vec<AnnouncementItem> {
        let url = "https://ja.monaca.io/headline/";
        MonacaHeadline.extract(markup, url, &lookup(url)).unwrap()
    }

    #[test]
    fn test_headline_entries() {
        let items = extract(HEADLINE_PAGE);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].published_at, Utc.with_ymd_and_hms(2025, 4, 17, 0, 0, 0).unwrap());
        assert_eq!(items[1].published_at, Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_badge_seeds_categories() {
        let items = extract(HEADLINE_PAGE);
        assert!(items[0].categories.contains(&"リリース".to_string()));
        assert!(items[1].categories.contains(&"重要".to_string()));
        // Keyword classification still runs over the body text.
        assert!(items[1].categories.contains(&"Deprecated".to_string()));
    }

    #[test]
    fn test_title_synthesized_from_content() {
        let items = extract(HEADLINE_PAGE);
        assert!(items[0].title.starts_with("Monaca デバッガー"));
    }

    #[test]
    fn test_generic_article_layout_via_later_template() {
        let markup = r#"
            <article>
                <h2>お知らせ</h2>
                <time datetime="2025-05-01">2025年5月1日</time>
                <div class="content">ダッシュボードを更新しました。</div>
            </article>
        "#;
        let items = extract(markup);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].published_at, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_fallback_on_structureless_markup() {
        let markup = "<h2>メンテナンス予定</h2> 2025/06/10 <br>";
        let items = extract(markup);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "メンテナンス予定");
    }
}
