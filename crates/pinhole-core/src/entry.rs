use crate::error::CoreError;
use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A stored short URL.
///
/// Values of this type handed out by a registry are snapshots: changing one
/// has no effect on the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The unique short code.
    pub code: ShortCode,
    /// The original URL that was shortened, exactly as supplied.
    pub original_url: String,
    /// When the entry was created.
    pub created_at: Timestamp,
    /// When the entry stops redirecting. Always after `created_at`.
    pub expires_at: Timestamp,
    /// Number of successful redirects through this entry.
    pub click_count: u64,
}

impl Entry {
    /// Creates a fresh entry with no clicks.
    pub fn new(
        code: ShortCode,
        original_url: impl Into<String>,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            code,
            original_url: original_url.into(),
            created_at,
            expires_at,
            click_count: 0,
        }
    }

    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn status_at(&self, now: Timestamp) -> EntryStatus {
        if self.is_expired_at(now) {
            EntryStatus::Expired
        } else {
            EntryStatus::Active
        }
    }

    /// Time left before the entry expires, or `None` once it has.
    pub fn remaining(&self, now: Timestamp) -> Option<SignedDuration> {
        if self.is_expired_at(now) {
            None
        } else {
            Some(self.expires_at.duration_since(now))
        }
    }
}

/// Logical lifecycle state of an entry at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Active,
    Expired,
}

impl Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Active => f.write_str("active"),
            EntryStatus::Expired => f.write_str("expired"),
        }
    }
}

/// Outcome of looking up a short code at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The entry exists and has not expired.
    Active(Entry),
    /// The entry exists but its TTL has elapsed.
    Expired(Entry),
    /// No entry holds this code.
    NotFound,
}

impl Resolution {
    /// Classifies an optional entry against `now`.
    pub fn classify(entry: Option<Entry>, now: Timestamp) -> Self {
        match entry {
            Some(entry) if entry.is_expired_at(now) => Self::Expired(entry),
            Some(entry) => Self::Active(entry),
            None => Self::NotFound,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Active(entry) | Self::Expired(entry) => Some(entry),
            Self::NotFound => None,
        }
    }

    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Active(entry) | Self::Expired(entry) => Some(entry),
            Self::NotFound => None,
        }
    }
}

/// Lifetime of a new entry, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Ttl(u32);

impl Ttl {
    pub const DEFAULT: Ttl = Ttl(30);

    /// Creates a TTL of `minutes`. Zero is rejected.
    pub fn from_minutes(minutes: u32) -> Result<Self, CoreError> {
        if minutes == 0 {
            return Err(CoreError::InvalidTtl(
                "ttl must be a positive number of minutes".to_string(),
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.0))
    }

    /// Computes the expiry instant of an entry created at `created_at`.
    pub fn expires_at(&self, created_at: Timestamp) -> Result<Timestamp, CoreError> {
        created_at.checked_add(self.as_duration()).map_err(|e| {
            CoreError::InvalidTtl(format!(
                "{} minutes after {} is out of range: {e}",
                self.0, created_at
            ))
        })
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Ttl {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<Ttl> for u32 {
    fn from(value: Ttl) -> Self {
        value.0
    }
}
