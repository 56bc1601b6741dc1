//! Library API integration tests over the shared HTML fixtures.

use chrono::{NaiveDate, TimeZone, Utc};
use kawaraban_core::*;

fn fixture(name: &str) -> String {
    let path = format!("../../tests/fixtures/{}", name);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture {}", path))
}

#[test]
fn test_generic_article_page() {
    let html = fixture("announcements.html");
    let site = siteconfig::lookup("https://example.com/news");
    let items = extract_announcements(&html, "https://example.com/news", &site).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "New dashboard generally available");
    assert_eq!(items[0].link, "https://example.com/news/dashboard-ga");
    assert_eq!(
        items[0].published_at,
        Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap()
    );

    assert!(items[1].categories.contains(&"Deprecated".to_string()));
    assert!(items[2].categories.contains(&"Security".to_string()));
}

#[test]
fn test_monaca_headline_page() {
    let html = fixture("monaca_headline.html");
    let url = "https://ja.monaca.io/headline/";
    let registry = Registry::with_defaults();
    let extractor = registry.resolve(url);
    assert_eq!(extractor.name(), "monaca-headline");

    let items = extractor.extract(&html, url, &siteconfig::lookup(url)).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0].published_at,
        Utc.with_ymd_and_hms(2025, 4, 17, 0, 0, 0).unwrap()
    );
    // The entry's own date element wins over dates inside the body text.
    assert_eq!(
        items[2].published_at,
        Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap()
    );

    assert!(items[0].categories.contains(&"リリース".to_string()));
    assert!(items[1].categories.contains(&"重要".to_string()));
    assert!(items[1].categories.contains(&"Deprecated".to_string()));
}

#[test]
fn test_firebase_releases_page() {
    let html = fixture("firebase_releases.html");
    let url = "https://firebase.google.com/support/releases";
    let registry = Registry::with_defaults();
    let extractor = registry.resolve(url);
    assert_eq!(extractor.name(), "firebase-releases");

    let items = extractor.extract(&html, url, &siteconfig::lookup(url)).unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(items[0].title, "Firebase Studio - Feature");
    assert_eq!(items[2].title, "Cloud Firestore - Changed");
    assert_eq!(items[3].title, "Firebase Authentication - Deprecated");

    let april = Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap();
    let march = Utc.with_ymd_and_hms(2025, 3, 12, 0, 0, 0).unwrap();
    assert!(items[..3].iter().all(|i| i.published_at == april));
    assert_eq!(items[3].published_at, march);

    assert_eq!(items[0].link, format!("{}#firebase-studio", url));
}

#[test]
fn test_page_without_announcements() {
    let html = fixture("no_announcements.html");
    let site = siteconfig::lookup("https://example.com/");
    let items = Generic.extract(&html, "https://example.com/", &site).unwrap();
    assert!(items.is_empty());
}

#[test]
fn test_regex_fallback_fixture() {
    let html = fixture("regex_only.html");
    let items = fallback::extract(&html, "https://example.com/status");

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "システム障害のお知らせ");
    assert_eq!(
        items[0].published_at,
        Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap()
    );
    assert_eq!(items[1].title, "Planned maintenance");
    assert_eq!(
        items[1].published_at,
        Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap()
    );
    assert_eq!(items[2].title, "料金改定のお知らせ");
    assert_eq!(
        items[2].published_at,
        Utc.with_ymd_and_hms(2025, 4, 28, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_extract_filter_render_round_trip() {
    let html = fixture("announcements.html");
    let url = "https://example.com/news";
    let items = extract_announcements(&html, url, &siteconfig::lookup(url)).unwrap();

    let options = FilterOptions {
        since: NaiveDate::from_ymd_opt(2025, 3, 1),
        ..Default::default()
    };
    let filtered = filter::apply(items, &options);
    assert_eq!(filtered.len(), 2);

    let feed = render_feed(&filtered, url, Some("Example Product News"), None).unwrap();
    let latest = latest_seen(&feed).unwrap().unwrap();
    assert_eq!(
        latest.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap()
    );

    let table = render_table(&filtered);
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows[0], "Date,Title,Category,Description");
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("\"2025/04/09\""));
}

#[test]
fn test_document_metadata_feeds_channel() {
    let html = fixture("announcements.html");
    let doc = Document::parse(&html).unwrap();

    assert_eq!(doc.title(), Some("Example Product News".to_string()));
    assert_eq!(
        doc.meta_description(),
        Some("Product announcements and release notes".to_string())
    );
}
