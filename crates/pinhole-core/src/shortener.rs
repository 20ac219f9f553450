use crate::entry::{Resolution, Ttl};
use crate::error::{BatchError, ShortenerError};
use crate::shortcode::ShortCode;
use crate::stats::{RegistryStats, Snapshot};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// Optional custom code. An empty string counts as absent.
    #[serde(default)]
    pub custom_code: Option<String>,
    /// Lifetime of the entry; the service default applies when absent.
    #[serde(default)]
    pub ttl: Option<Ttl>,
}

impl ShortenParams {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            custom_code: None,
            ttl: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The custom code, with empty input treated as absent.
    ///
    /// Whitespace is kept, so a blank code fails format validation instead
    /// of silently falling back to a generated one.
    pub fn requested_code(&self) -> Option<&str> {
        self.custom_code.as_deref().filter(|code| !code.is_empty())
    }
}

/// A successfully created short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortened {
    pub code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Per-entry outcomes of a batch, in input order.
pub type BatchOutcome = Vec<Result<Shortened>>;

/// The creation and reporting side of the service.
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL.
    fn shorten(&self, params: ShortenParams) -> Result<Shortened>;

    /// Creates several shortened URLs after validating the whole batch.
    fn shorten_batch(
        &self,
        batch: Vec<ShortenParams>,
    ) -> std::result::Result<BatchOutcome, BatchError>;

    /// Classifies a short code without counting a click.
    fn inspect(&self, code: &ShortCode) -> Resolution;

    /// Returns every entry, in creation order, with the instant it was taken.
    fn snapshot(&self) -> Snapshot;

    /// The instant the service uses for expiry decisions.
    fn now(&self) -> Timestamp;

    fn stats(&self) -> RegistryStats {
        self.snapshot().stats()
    }
}

/// The redirect side of the service.
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code for redirection.
    ///
    /// An `Active` result has already had exactly one click recorded.
    fn redirect(&self, code: &ShortCode) -> Resolution;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_custom_code_is_absent() {
        assert_eq!(ShortenParams::new("https://a.com").requested_code(), None);
        assert_eq!(
            ShortenParams::new("https://a.com")
                .with_custom_code("")
                .requested_code(),
            None
        );
        assert_eq!(
            ShortenParams::new("https://a.com")
                .with_custom_code("  ")
                .requested_code(),
            Some("  ")
        );
        assert_eq!(
            ShortenParams::new("https://a.com")
                .with_custom_code("promo1")
                .requested_code(),
            Some("promo1")
        );
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: ShortenParams =
            serde_json::from_str(r#"{"original_url":"https://a.com"}"#).unwrap();
        assert_eq!(params, ShortenParams::new("https://a.com"));

        let zero_ttl =
            serde_json::from_str::<ShortenParams>(r#"{"original_url":"https://a.com","ttl":0}"#);
        assert!(zero_ttl.is_err());
    }
}
