//! Page fetching and the rendering capability port.
//!
//! Static fetching is a plain HTTP GET through reqwest. JavaScript-driven
//! pages additionally need a rendering pass, which is modeled as the
//! [`PageRenderer`] trait so the extraction pipeline can be exercised with
//! fixture markup instead of a real browser; [`NullRenderer`] is the
//! built-in "no rendering available" implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::siteconfig::WaitPolicy;
use crate::{Error, Result};

/// HTTP client configuration for fetching source pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Kawaraban/0.3; +https://github.com/kawaraban/kawaraban)"
                .to_string(),
        }
    }
}

/// Fetches page markup from a URL.
///
/// Performs a GET request with browser-like Accept headers (Japanese
/// sources first in the language preferences) and returns the body as
/// text. Timeouts map to [`Error::Timeout`]; everything else transport-
/// related maps to [`Error::Http`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(Error::Http)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "ja,en-US;q=0.8,en;q=0.6")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { Error::Timeout { timeout: config.timeout } } else { Error::Http(e) }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Capability port for JavaScript-capable page rendering.
///
/// `Ok(None)` means the renderer declined or timed out softly — the caller
/// proceeds with static markup alone. A hard `Err` is reserved for broken
/// renderer setups.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str, wait: &WaitPolicy) -> Result<Option<String>>;
}

/// The "no rendering capability" renderer; always yields `Ok(None)`.
pub struct NullRenderer;

#[async_trait]
impl PageRenderer for NullRenderer {
    async fn render(&self, _url: &str, _wait: &WaitPolicy) -> Result<Option<String>> {
        Ok(None)
    }
}
