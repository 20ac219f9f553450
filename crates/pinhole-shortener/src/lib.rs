//! URL shortener service implementation.
//!
//! This crate provides the short code allocator and the service that ties
//! an allocator, a registry and a clock together. Core types are
//! re-exported from `pinhole_core`.

pub mod allocator;
pub mod service;
pub mod validation;

pub use allocator::{ShortcodeAllocator, MAX_ATTEMPTS};
pub use pinhole_core::ShortenerError;
pub use service::{ServiceSettings, ShortenerService, DEFAULT_MAX_BATCH};
