//! Storage capability behind the blacklist.
//!
//! The blacklist persists revocation entries through the [`Storage`] trait so
//! it can sit on top of any key-value store with per-key TTL support. An
//! in-memory implementation is provided for tests and embedded use.

#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::MemoryStorage;
pub use trait_::Storage;
