use crate::entry::{Entry, Resolution};
use crate::error::RegistryError;
use crate::shortcode::ShortCode;
use jiff::Timestamp;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// A read-only view of a registry.
///
/// This trait provides only the read operations from [`Registry`], which is
/// all the short code allocator needs for its collision checks.
pub trait ReadRegistry: Send + Sync + 'static {
    /// Checks whether a short code is taken, whether or not its entry has
    /// expired. Codes are never recycled.
    fn exists(&self, code: &ShortCode) -> bool;

    /// Returns a snapshot of the entry for `code`, regardless of expiry.
    fn get(&self, code: &ShortCode) -> Option<Entry>;

    /// Classifies the entry for `code` at `now` without touching its counter.
    fn resolve(&self, code: &ShortCode, now: Timestamp) -> Resolution {
        Resolution::classify(self.get(code), now)
    }

    /// Returns snapshots of every entry in creation order.
    fn list(&self) -> Vec<Entry>;

    /// Number of entries held, expired ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Registry: ReadRegistry {
    /// Inserts a new entry.
    ///
    /// Returns `Err(DuplicateKey)` if the code is already taken and
    /// `Err(InvalidLifetime)` if the entry does not expire after it was
    /// created. The existence check and the insert happen atomically.
    fn insert(&self, entry: Entry) -> Result<()>;

    /// Classifies the entry for `code` at `now` and, if it is active,
    /// increments its click counter in the same critical section.
    ///
    /// An `Active` result carries the entry as it is after the increment.
    fn visit(&self, code: &ShortCode, now: Timestamp) -> Resolution;

    /// Increments the click counter of an active entry by one and returns
    /// the new count. Expired and missing entries are left untouched.
    fn record_click(&self, code: &ShortCode, now: Timestamp) -> Result<u64> {
        match self.visit(code, now) {
            Resolution::Active(entry) => Ok(entry.click_count),
            Resolution::Expired(_) => Err(RegistryError::Expired(code.clone())),
            Resolution::NotFound => Err(RegistryError::NotFound(code.clone())),
        }
    }
}

/// Checks the lifetime invariant every backend enforces on insert.
pub fn check_lifetime(entry: &Entry) -> Result<()> {
    if entry.expires_at <= entry.created_at {
        return Err(RegistryError::InvalidLifetime {
            code: entry.code.clone(),
            created_at: entry.created_at,
            expires_at: entry.expires_at,
        });
    }
    Ok(())
}

impl<T: ReadRegistry + ?Sized> ReadRegistry for std::sync::Arc<T> {
    fn exists(&self, code: &ShortCode) -> bool {
        (**self).exists(code)
    }

    fn get(&self, code: &ShortCode) -> Option<Entry> {
        (**self).get(code)
    }

    fn resolve(&self, code: &ShortCode, now: Timestamp) -> Resolution {
        (**self).resolve(code, now)
    }

    fn list(&self) -> Vec<Entry> {
        (**self).list()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T: Registry + ?Sized> Registry for std::sync::Arc<T> {
    fn insert(&self, entry: Entry) -> Result<()> {
        (**self).insert(entry)
    }

    fn visit(&self, code: &ShortCode, now: Timestamp) -> Resolution {
        (**self).visit(code, now)
    }

    fn record_click(&self, code: &ShortCode, now: Timestamp) -> Result<u64> {
        (**self).record_click(code, now)
    }
}
