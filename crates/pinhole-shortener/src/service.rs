use crate::allocator::{ShortcodeAllocator, MAX_ATTEMPTS};
use crate::validation::validate_url;
use jiff::Timestamp;
use pinhole_core::{
    BatchError, BatchOutcome, Clock, Entry, ReadRegistry, Redirector, Registry, Resolution,
    ShortCode, ShortenParams, Shortened, Shortener, ShortenerError, Snapshot, SystemClock, Ttl,
};
use pinhole_generator::Generator;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Most entries accepted in one batch.
pub const DEFAULT_MAX_BATCH: usize = 5;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceSettings {
    /// TTL applied when a request does not specify one.
    #[builder(default)]
    pub default_ttl: Ttl,
    /// Generated candidates drawn before giving up.
    #[builder(default = MAX_ATTEMPTS)]
    pub max_attempts: u32,
    #[builder(default = DEFAULT_MAX_BATCH)]
    pub max_batch: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` and `Redirector` traits.
///
/// This service wraps a `Registry`, a `Generator` and a `Clock` to handle:
/// - URL validation
/// - Short code allocation (custom or generated, with bounded retry)
/// - Expiry computation from the requested TTL
/// - Redirect resolution with click counting
#[derive(Debug)]
pub struct ShortenerService<R, G, C = SystemClock> {
    registry: Arc<R>,
    allocator: ShortcodeAllocator<G>,
    clock: C,
    settings: ServiceSettings,
}

impl<R: Registry, G: Generator> ShortenerService<R, G, SystemClock> {
    /// Creates a new `ShortenerService` on the system clock with default settings.
    pub fn new(registry: R, generator: G) -> Self {
        Self::from_parts(
            Arc::new(registry),
            generator,
            SystemClock,
            ServiceSettings::default(),
        )
    }
}

impl<R: Registry, G: Generator, C: Clock> ShortenerService<R, G, C> {
    /// Creates a service around a registry that may be shared with others.
    pub fn from_parts(registry: Arc<R>, generator: G, clock: C, settings: ServiceSettings) -> Self {
        Self {
            registry,
            allocator: ShortcodeAllocator::with_max_attempts(generator, settings.max_attempts),
            clock,
            settings,
        }
    }

    /// Replaces the clock used for creation and expiry decisions.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ShortenerService<R, G, C2> {
        ShortenerService::from_parts(
            self.registry,
            self.allocator.into_generator(),
            clock,
            self.settings,
        )
    }

    pub fn with_settings(self, settings: ServiceSettings) -> Self {
        Self::from_parts(
            self.registry,
            self.allocator.into_generator(),
            self.clock,
            settings,
        )
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Checks everything about a request that does not depend on the
    /// registry. Returns the parsed URL and the expiry the entry would get
    /// if created at `now`.
    fn validate(
        &self,
        params: &ShortenParams,
        now: Timestamp,
    ) -> Result<(Url, Timestamp), ShortenerError> {
        let url = validate_url(&params.original_url)?;
        if let Some(code) = params.requested_code() {
            ShortCode::new(code)?;
        }
        let ttl = params.ttl.unwrap_or(self.settings.default_ttl);
        Ok((url, ttl.expires_at(now)?))
    }
}

/// Returns the first custom code that appears twice in `batch`.
fn find_duplicate_code(batch: &[ShortenParams]) -> Option<String> {
    let mut seen = HashSet::new();
    batch
        .iter()
        .filter_map(ShortenParams::requested_code)
        .find(|code| !seen.insert(*code))
        .map(str::to_string)
}

impl<R: Registry, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    fn shorten(&self, params: ShortenParams) -> Result<Shortened, ShortenerError> {
        info!(url = %params.original_url, "creating short URL");

        let created_at = self.clock.now();
        let (url, expires_at) = self.validate(&params, created_at).inspect_err(|e| {
            warn!(url = %params.original_url, error = %e, "rejected short URL request");
        })?;

        let code = self
            .allocator
            .resolve(&*self.registry, params.requested_code())?;

        // The serialized form is what redirects hand out, so it must be a
        // valid header value.
        let original_url = String::from(url);
        let entry = Entry::new(code.clone(), original_url.clone(), created_at, expires_at);

        // The allocator's check and this insert are separate steps; the
        // registry rejects the insert if another caller won in between.
        self.registry.insert(entry).inspect_err(|e| {
            warn!(code = %code, error = %e, "lost race for short code");
        })?;

        info!(code = %code, expires_at = %expires_at, "short URL created");
        Ok(Shortened {
            code,
            original_url,
            created_at,
            expires_at,
        })
    }

    fn shorten_batch(&self, batch: Vec<ShortenParams>) -> Result<BatchOutcome, BatchError> {
        if batch.is_empty() {
            return Err(BatchError::Empty);
        }
        if batch.len() > self.settings.max_batch {
            return Err(BatchError::TooLarge {
                max: self.settings.max_batch,
                got: batch.len(),
            });
        }

        let now = self.clock.now();
        for (index, params) in batch.iter().enumerate() {
            self.validate(params, now)
                .map_err(|source| BatchError::InvalidEntry { index, source })?;
        }

        if let Some(code) = find_duplicate_code(&batch) {
            warn!(code = %code, "duplicate custom short code in batch");
            return Err(BatchError::DuplicateCustomCode(code));
        }

        let outcome: BatchOutcome = batch
            .into_iter()
            .enumerate()
            .map(|(index, params)| {
                self.shorten(params).inspect_err(|e| {
                    warn!(index, error = %e, "failed to create short URL in batch");
                })
            })
            .collect();

        let succeeded = outcome.iter().filter(|r| r.is_ok()).count();
        info!(
            succeeded,
            failed = outcome.len() - succeeded,
            "batch processing completed"
        );
        Ok(outcome)
    }

    fn inspect(&self, code: &ShortCode) -> Resolution {
        let resolution = self.registry.resolve(code, self.clock.now());
        debug!(code = %code, found = resolution.entry().is_some(), "inspected short code");
        resolution
    }

    fn snapshot(&self) -> Snapshot {
        let taken_at = self.clock.now();
        let entries = self.registry.list();
        debug!(entries = entries.len(), "registry snapshot taken");
        Snapshot { taken_at, entries }
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl<R: Registry, G: Generator, C: Clock> Redirector for ShortenerService<R, G, C> {
    fn redirect(&self, code: &ShortCode) -> Resolution {
        let resolution = self.registry.visit(code, self.clock.now());

        match &resolution {
            Resolution::Active(entry) => {
                info!(
                    code = %code,
                    url = %entry.original_url,
                    clicks = entry.click_count,
                    "redirecting"
                );
            }
            Resolution::Expired(entry) => {
                warn!(code = %code, expired_at = %entry.expires_at, "expired link accessed");
            }
            Resolution::NotFound => {
                warn!(code = %code, "short code not found");
            }
        }

        resolution
    }
}
