//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate provides the shared value types, the registry contract and
//! the error taxonomy used by the generator, registry, shortener and
//! gateway crates.

pub mod clock;
pub mod entry;
pub mod error;
pub mod registry;
pub mod shortcode;
pub mod shortener;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, EntryStatus, Resolution, Ttl};
pub use error::{AllocationError, BatchError, CoreError, RegistryError, ShortenerError};
pub use registry::{ReadRegistry, Registry};
pub use shortcode::ShortCode;
pub use shortener::{BatchOutcome, Redirector, ShortenParams, Shortened, Shortener};
pub use stats::{RegistryStats, Snapshot};
