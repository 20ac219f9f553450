use jiff::Timestamp;
use pinhole_core::{
    Entry, EntryStatus, ShortenParams, Shortened, ShortenerError, Snapshot, Ttl,
};
use serde::{Deserialize, Serialize};

use crate::error::shortener_error_kind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub original_url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
    /// Lifetime in minutes; the service default applies when absent.
    #[serde(default)]
    pub ttl_minutes: Option<i64>,
}

impl TryFrom<CreateUrlRequest> for ShortenParams {
    type Error = ShortenerError;

    fn try_from(request: CreateUrlRequest) -> Result<Self, Self::Error> {
        let ttl = match request.ttl_minutes {
            None => None,
            Some(minutes) => {
                let minutes = u32::try_from(minutes).map_err(|_| {
                    ShortenerError::InvalidTtl(format!("{minutes} minutes is out of range"))
                })?;
                Some(Ttl::from_minutes(minutes)?)
            }
        };

        Ok(ShortenParams {
            original_url: request.original_url,
            custom_code: request.custom_code,
            ttl,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl CreateUrlResponse {
    pub fn new(shortened: Shortened, state: &AppState) -> Self {
        Self {
            short_url: state.short_url(&shortened.code),
            code: shortened.code.into(),
            original_url: shortened.original_url,
            created_at: shortened.created_at,
            expires_at: shortened.expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchCreateRequest {
    pub urls: Vec<CreateUrlRequest>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchItem {
    Created(CreateUrlResponse),
    Failed {
        error: &'static str,
        message: String,
    },
}

impl BatchItem {
    pub fn new(outcome: Result<Shortened, ShortenerError>, state: &AppState) -> Self {
        match outcome {
            Ok(shortened) => BatchItem::Created(CreateUrlResponse::new(shortened, state)),
            Err(err) => BatchItem::Failed {
                error: shortener_error_kind(&err),
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchCreateResponse {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

/// Reporting view of a single entry.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub click_count: u64,
    pub status: EntryStatus,
    /// Whole seconds left before expiry, absent once expired.
    pub remaining_seconds: Option<i64>,
}

impl UrlResponse {
    /// Reports `entry` as having `status`, with time left measured from `now`.
    pub fn new(entry: Entry, status: EntryStatus, now: Timestamp, state: &AppState) -> Self {
        let remaining_seconds = match status {
            EntryStatus::Active => entry.remaining(now).map(|left| left.as_secs()),
            EntryStatus::Expired => None,
        };
        Self {
            short_url: state.short_url(&entry.code),
            status,
            remaining_seconds,
            code: entry.code.into(),
            original_url: entry.original_url,
            created_at: entry.created_at,
            expires_at: entry.expires_at,
            click_count: entry.click_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUrlsResponse {
    pub taken_at: Timestamp,
    pub urls: Vec<UrlResponse>,
}

impl ListUrlsResponse {
    pub fn new(snapshot: Snapshot, state: &AppState) -> Self {
        let taken_at = snapshot.taken_at;
        Self {
            taken_at,
            urls: snapshot
                .entries
                .into_iter()
                .map(|entry| {
                    let status = entry.status_at(taken_at);
                    UrlResponse::new(entry, status, taken_at, state)
                })
                .collect(),
        }
    }
}
