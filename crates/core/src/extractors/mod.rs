//! Per-source extractors and the registry that dispatches to them.
//!
//! Sources with markup quirks worth special-casing get their own
//! [`Extractor`] implementation; everything else goes through
//! [`Generic`](generic::Generic). The registry is a closed set — resolution
//! never fails because the generic extractor accepts any URL.

pub mod firebase;
pub mod generic;
pub mod monaca;

use crate::Result;
use crate::item::AnnouncementItem;
use crate::siteconfig::SiteConfig;

pub use firebase::FirebaseReleases;
pub use generic::Generic;
pub use monaca::MonacaHeadline;

/// A source-specific extraction strategy.
pub trait Extractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this extractor handles the given URL.
    fn matches(&self, url: &str) -> bool;

    /// Extracts announcement items from the page markup.
    ///
    /// An empty result is not an error; it means the page yielded nothing
    /// recognizable.
    fn extract(&self, markup: &str, url: &str, site: &SiteConfig) -> Result<Vec<AnnouncementItem>>;
}

/// Ordered set of specialized extractors with a generic fallback.
pub struct Registry {
    specialized: Vec<Box<dyn Extractor>>,
    generic: Generic,
}

impl Registry {
    /// Registry with all built-in extractors.
    pub fn with_defaults() -> Self {
        Self {
            specialized: vec![Box::new(FirebaseReleases), Box::new(MonacaHeadline)],
            generic: Generic,
        }
    }

    /// Registry containing only the generic extractor.
    pub fn generic_only() -> Self {
        Self { specialized: Vec::new(), generic: Generic }
    }

    /// Picks the extractor for a URL. Total: falls back to the generic
    /// extractor when no specialized one matches.
    pub fn resolve(&self, url: &str) -> &dyn Extractor {
        self.specialized
            .iter()
            .find(|e| e.matches(url))
            .map(|e| e.as_ref())
            .unwrap_or(&self.generic)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
