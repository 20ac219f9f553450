use crate::shortcode::ShortCode;
use jiff::Timestamp;
use thiserror::Error;

/// Validation errors for the core value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
}

/// Errors returned by registry backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("short code already exists: {0}")]
    DuplicateKey(ShortCode),
    #[error("entry {code} expires at {expires_at}, which is not after its creation at {created_at}")]
    InvalidLifetime {
        code: ShortCode,
        created_at: Timestamp,
        expires_at: Timestamp,
    },
    #[error("short code not found: {0}")]
    NotFound(ShortCode),
    #[error("short code has expired: {0}")]
    Expired(ShortCode),
}

/// Errors produced while picking a short code for a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("invalid short code: {0}")]
    InvalidFormat(String),
    #[error("short code is already taken: {0}")]
    Collision(ShortCode),
    #[error("no unique short code found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Errors returned to callers creating a short URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidFormat(String),
    #[error("short code is already taken: {0}")]
    Collision(ShortCode),
    #[error("no unique short code found after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    #[error("short code was claimed concurrently: {0}")]
    DuplicateKey(ShortCode),
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors that reject a whole batch before any entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("batch is empty")]
    Empty,
    #[error("batch holds {got} entries, at most {max} are allowed")]
    TooLarge { max: usize, got: usize },
    #[error("entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        source: ShortenerError,
    },
    #[error("custom short code appears more than once in the batch: {0}")]
    DuplicateCustomCode(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidFormat(message),
            CoreError::InvalidTtl(message) => Self::InvalidTtl(message),
        }
    }
}

impl From<CoreError> for AllocationError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidFormat(message),
            other => Self::InvalidFormat(other.to_string()),
        }
    }
}

impl From<AllocationError> for ShortenerError {
    fn from(value: AllocationError) -> Self {
        match value {
            AllocationError::InvalidFormat(message) => Self::InvalidFormat(message),
            AllocationError::Collision(code) => Self::Collision(code),
            AllocationError::Exhausted { attempts } => Self::AllocationExhausted { attempts },
        }
    }
}

impl From<RegistryError> for ShortenerError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::DuplicateKey(code) => Self::DuplicateKey(code),
            invalid @ RegistryError::InvalidLifetime { .. } => Self::InvalidTtl(invalid.to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}
