use dashmap::mapref::entry::Entry as Slot;
use dashmap::DashMap;
use jiff::Timestamp;
use pinhole_core::registry::{check_lifetime, ReadRegistry, Registry, Result};
use pinhole_core::{Entry, RegistryError, Resolution, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// In-memory storage record: the entry plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Record {
    seq: u64,
    entry: Entry,
}

/// In-memory implementation of the Registry trait using DashMap.
///
/// DashMap shards its locks, so lookups and clicks on different codes
/// rarely contend. Insert uses the map's entry API, which holds the shard
/// write lock across the vacancy check and the insert. Click counting goes
/// through `get_mut`, which holds the same lock across the expiry check and
/// the increment.
///
/// Listing walks the shards one at a time; entries inserted while a listing
/// is in progress may or may not appear in it.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    storage: DashMap<ShortCode, Record>,
    next_seq: AtomicU64,
}

impl InMemoryRegistry {
    /// Creates a new in-memory registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory registry with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl ReadRegistry for InMemoryRegistry {
    fn exists(&self, code: &ShortCode) -> bool {
        self.storage.contains_key(code)
    }

    fn get(&self, code: &ShortCode) -> Option<Entry> {
        self.storage.get(code).map(|record| record.entry.clone())
    }

    fn list(&self) -> Vec<Entry> {
        let mut records: Vec<Record> = self
            .storage
            .iter()
            .map(|record| record.value().clone())
            .collect();
        records.sort_unstable_by_key(|record| record.seq);
        records.into_iter().map(|record| record.entry).collect()
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}

impl Registry for InMemoryRegistry {
    fn insert(&self, entry: Entry) -> Result<()> {
        check_lifetime(&entry)?;

        match self.storage.entry(entry.code.clone()) {
            Slot::Occupied(_) => {
                debug!(code = %entry.code, "rejecting insert of existing short code");
                Err(RegistryError::DuplicateKey(entry.code))
            }
            Slot::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                trace!(code = %entry.code, seq, "inserted entry");
                slot.insert(Record { seq, entry });
                Ok(())
            }
        }
    }

    fn visit(&self, code: &ShortCode, now: Timestamp) -> Resolution {
        let Some(mut record) = self.storage.get_mut(code) else {
            trace!(code = %code, "short code not found");
            return Resolution::NotFound;
        };

        if record.entry.is_expired_at(now) {
            trace!(code = %code, "short code has expired");
            return Resolution::Expired(record.entry.clone());
        }

        record.entry.click_count = record.entry.click_count.saturating_add(1);
        trace!(code = %code, clicks = record.entry.click_count, "recorded click");
        Resolution::Active(record.entry.clone())
    }
}
