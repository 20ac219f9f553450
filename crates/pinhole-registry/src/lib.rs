//! Registry backends for Pinhole.
//!
//! Both backends keep every entry for the lifetime of the process and
//! enforce the same invariants; they differ only in how they lock.

pub mod locked;
pub mod memory;

pub use locked::LockedRegistry;
pub use memory::InMemoryRegistry;
pub use pinhole_core::registry::{ReadRegistry, Registry, Result};
pub use pinhole_core::RegistryError;
