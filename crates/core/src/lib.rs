pub mod categories;
pub mod dates;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod fallback;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod filter;
pub mod formatters;
pub mod item;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod scrape;
pub mod siteconfig;

pub use error::{Error, Result};
pub use extract::{extract_announcements, extract_with_templates, prefer_richer};
pub use extractors::{Extractor, FirebaseReleases, Generic, MonacaHeadline, Registry};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, NullRenderer, PageRenderer, fetch_url};
pub use filter::FilterOptions;
pub use formatters::{latest_seen, latest_seen_in_file, render_feed, render_table};
pub use item::AnnouncementItem;
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use scrape::{scrape_url, scrape_with_config};
pub use siteconfig::{SelectorTemplate, SiteConfig, WaitPolicy};
