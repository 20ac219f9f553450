use crate::entry::Entry;
use jiff::Timestamp;
use serde::Serialize;

/// Aggregate counts over a registry snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub total_clicks: u64,
}

impl RegistryStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>, now: Timestamp) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut stats, entry| {
                stats.total += 1;
                if entry.is_expired_at(now) {
                    stats.expired += 1;
                } else {
                    stats.active += 1;
                }
                stats.total_clicks = stats.total_clicks.saturating_add(entry.click_count);
                stats
            })
    }
}

/// Entries captured at a single instant, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub taken_at: Timestamp,
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub fn stats(&self) -> RegistryStats {
        RegistryStats::from_entries(&self.entries, self.taken_at)
    }
}
