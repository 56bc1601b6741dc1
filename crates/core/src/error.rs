//! Error types for kawaraban operations.
//!
//! This module defines the main error type [`Error`] which represents all
//! failures that can occur while fetching pages, resolving selectors, and
//! emitting or re-reading feed documents.
//!
//! Extraction yielding zero items is deliberately *not* an error: the
//! cascade returns an empty list and the caller decides whether that is
//! fatal for the run.

use thiserror::Error;

/// Main error type for announcement scraping operations.
///
/// # Example
///
/// ```rust
/// use kawaraban_core::Error;
///
/// let err = Error::InvalidUrl("not a url".to_string());
/// assert!(err.to_string().contains("Invalid URL"));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, and other
    /// transport-level problems. Failure is isolated to the URL being
    /// processed; a multi-URL run continues past it.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Rendering wait condition not satisfied within budget.
    ///
    /// A soft failure in practice: callers proceed with whatever static
    /// markup is available rather than aborting the URL.
    #[error("Page rendering timed out after {wait} seconds")]
    RenderTimeout { wait: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector in a template could not be parsed.
    ///
    /// Selectors matching zero elements are not an error; only malformed
    /// selector strings are.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// A previously written feed document could not be re-parsed.
    ///
    /// Returned by the differential-mode helper when the existing feed XML
    /// is unreadable.
    #[error("Failed to parse feed document: {0}")]
    FeedParse(String),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_render_timeout_is_distinct() {
        let err = Error::RenderTimeout { wait: 20 };
        assert!(err.to_string().contains("rendering"));
    }

    #[test]
    fn test_selector_error() {
        let err = Error::Selector("[[bad".to_string());
        assert!(err.to_string().contains("[[bad"));
    }
}
