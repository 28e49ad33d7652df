//! Storage trait defining the key-value capability behind the blacklist.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;

/// Key-value store with per-key TTL and permanent-entry semantics.
///
/// Values are opaque to the store; the TTL is an advisory expiry enforced by
/// the store itself. Implementations may be remote and must be assumed to
/// block and to fail transiently — transport failures surface as
/// [`crate::TokenError::BackendUnavailable`], which callers may retry.
///
/// # Consistency
///
/// Implementations must provide read-your-writes consistency for a single
/// key and treat each operation as atomic at the key level. The blacklist
/// relies on this instead of taking in-process locks.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a value under `key`, expiring after `ttl_minutes`.
    async fn add(&self, key: &str, value: Value, ttl_minutes: i64) -> Result<()>;

    /// Store a value under `key` with no expiry.
    async fn forever(&self, key: &str, value: Value) -> Result<()>;

    /// Fetch the value under `key`, if present and not yet expired.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Delete the entry under `key`.
    ///
    /// Returns `true` if an entry was deleted, `false` if none existed.
    async fn destroy(&self, key: &str) -> Result<bool>;

    /// Erase all entries.
    async fn flush(&self) -> Result<()>;
}
