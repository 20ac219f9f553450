use jiff::Timestamp;
use parking_lot::RwLock;
use pinhole_core::registry::{check_lifetime, ReadRegistry, Registry, Result};
use pinhole_core::{Entry, RegistryError, Resolution, ShortCode};
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct State {
    /// Entries in creation order.
    entries: Vec<Entry>,
    /// Position of each code in `entries`.
    index: HashMap<ShortCode, usize>,
}

/// Registry guarded by a single reader-writer lock.
///
/// Reads share the lock; inserts and clicks take it exclusively. Listing
/// returns a consistent snapshot of the whole registry.
#[derive(Debug, Default)]
pub struct LockedRegistry {
    state: RwLock<State>,
}

impl LockedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RwLock::new(State {
                entries: Vec::with_capacity(capacity),
                index: HashMap::with_capacity(capacity),
            }),
        }
    }
}

impl ReadRegistry for LockedRegistry {
    fn exists(&self, code: &ShortCode) -> bool {
        self.state.read().index.contains_key(code)
    }

    fn get(&self, code: &ShortCode) -> Option<Entry> {
        let state = self.state.read();
        state
            .index
            .get(code)
            .map(|&position| state.entries[position].clone())
    }

    fn list(&self) -> Vec<Entry> {
        self.state.read().entries.clone()
    }

    fn len(&self) -> usize {
        self.state.read().entries.len()
    }
}

impl Registry for LockedRegistry {
    fn insert(&self, entry: Entry) -> Result<()> {
        check_lifetime(&entry)?;

        let mut state = self.state.write();
        if state.index.contains_key(&entry.code) {
            debug!(code = %entry.code, "rejecting insert of existing short code");
            return Err(RegistryError::DuplicateKey(entry.code));
        }

        let position = state.entries.len();
        state.index.insert(entry.code.clone(), position);
        trace!(code = %entry.code, position, "inserted entry");
        state.entries.push(entry);
        Ok(())
    }

    fn visit(&self, code: &ShortCode, now: Timestamp) -> Resolution {
        let mut state = self.state.write();
        let Some(&position) = state.index.get(code) else {
            trace!(code = %code, "short code not found");
            return Resolution::NotFound;
        };

        let entry = &mut state.entries[position];
        if entry.is_expired_at(now) {
            trace!(code = %code, "short code has expired");
            return Resolution::Expired(entry.clone());
        }

        entry.click_count = entry.click_count.saturating_add(1);
        trace!(code = %code, clicks = entry.click_count, "recorded click");
        Resolution::Active(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn t0() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn entry(c: &str) -> Entry {
        Entry::new(
            code(c),
            "https://example.com",
            t0(),
            t0() + SignedDuration::from_mins(1),
        )
    }

    #[test]
    fn insert_then_get() {
        let registry = LockedRegistry::new();
        registry.insert(entry("abc123")).unwrap();

        assert!(registry.exists(&code("abc123")));
        assert_eq!(registry.get(&code("abc123")), Some(entry("abc123")));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let registry = LockedRegistry::new();
        registry.insert(entry("abc123")).unwrap();

        let err = registry.insert(entry("abc123")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey(code("abc123")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn record_click_reports_failure_kind() {
        let registry = LockedRegistry::new();
        registry.insert(entry("abc123")).unwrap();

        assert_eq!(registry.record_click(&code("abc123"), t0()), Ok(1));
        assert_eq!(registry.record_click(&code("abc123"), t0()), Ok(2));
        assert_eq!(
            registry.record_click(&code("abc123"), t0() + SignedDuration::from_mins(1)),
            Err(RegistryError::Expired(code("abc123")))
        );
        assert_eq!(
            registry.record_click(&code("nope"), t0()),
            Err(RegistryError::NotFound(code("nope")))
        );
        assert_eq!(registry.get(&code("abc123")).unwrap().click_count, 2);
    }

    #[test]
    fn list_preserves_creation_order() {
        let registry = LockedRegistry::with_capacity(3);
        for c in ["zzz", "mmm", "aaa"] {
            registry.insert(entry(c)).unwrap();
        }

        let codes: Vec<_> = registry.list().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![code("zzz"), code("mmm"), code("aaa")]);
    }
}
