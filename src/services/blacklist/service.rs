//! Blacklist service implementation.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::entities::token::ClaimSet;
use crate::errors::{Result, TokenError};
use crate::storage::Storage;

/// Claim used as the storage key by default.
pub const DEFAULT_KEY_CLAIM: &str = "jti";

/// Default grace period: 20160 minutes (14 days), the historical refresh TTL.
pub const DEFAULT_GRACE_PERIOD_SECS: i64 = 20160 * 60;

/// Marker value for permanently revoked tokens.
const FOREVER: &str = "forever";

/// Whether a stored entry still denotes active revocation: the permanent
/// marker, or a grace record whose window has not passed.
fn entry_is_live(value: &Value, now: i64) -> bool {
    match value {
        Value::String(marker) => marker == FOREVER,
        other => matches!(
            other.get("valid_until").and_then(Value::as_i64),
            Some(ts) if ts >= now
        ),
    }
}

/// Revocation ledger keyed by a configurable claim.
///
/// Entries are either a permanent marker or a grace-window record
/// `{"valid_until": ts}`. Grace records carry a storage TTL that outlives the
/// token's own expiry by the grace period, so replay during the grace window
/// is still caught while the entry self-expires once it can no longer matter.
pub struct Blacklist<T: Storage> {
    storage: T,
    key_claim: String,
    grace_period_secs: i64,
}

impl<T: Storage> Blacklist<T> {
    pub fn new(storage: T) -> Self {
        Self {
            storage,
            key_claim: DEFAULT_KEY_CLAIM.to_string(),
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
        }
    }

    /// Reconfigures which claim is used as the storage key.
    ///
    /// The claim must be present in every claim set this blacklist is asked
    /// to check; lookups on a claim set missing it fail with
    /// [`TokenError::Configuration`].
    pub fn set_key(&mut self, claim: impl Into<String>) {
        self.key_claim = claim.into();
    }

    /// Overrides the default grace period.
    pub fn set_grace_period(&mut self, seconds: i64) {
        self.grace_period_secs = seconds;
    }

    pub fn key_claim(&self) -> &str {
        &self.key_claim
    }

    pub fn grace_period_secs(&self) -> i64 {
        self.grace_period_secs
    }

    /// Extracts the configured key claim from a claim set.
    pub fn key_for(&self, claims: &ClaimSet) -> Result<String> {
        match claims.claim(&self.key_claim) {
            Some(Value::String(key)) => Ok(key),
            Some(value) => Ok(value.to_string()),
            None => Err(TokenError::Configuration {
                claim: self.key_claim.clone(),
            }),
        }
    }

    /// Adds a claim set to the blacklist.
    ///
    /// A claim set without `exp` is stored permanently regardless of
    /// `permanent`: a token that never expires must stay revocable forever.
    /// Otherwise a grace-window record is stored with a TTL of
    /// `(exp - now) + grace`, clamped so an already-expired token still gets
    /// the full grace window from now. Re-adding while the existing entry is
    /// still live is a no-op returning `true`, so a permanent marker is never
    /// downgraded; a stale grace record whose window has already passed is
    /// replaced with a fresh one.
    pub async fn add(&self, claims: &ClaimSet, permanent: bool) -> Result<bool> {
        let key = self.key_for(claims)?;

        let exp = match claims.exp {
            Some(exp) if !permanent => exp,
            _ => {
                debug!(key = %key, "blacklisting token permanently");
                self.storage.forever(&key, json!(FOREVER)).await?;
                return Ok(true);
            }
        };

        // Only a live entry short-circuits. The storage TTL outlives
        // valid_until, so a stale grace record may still be present and must
        // be overwritten or the re-added token would stay accepted.
        if let Some(existing) = self.storage.get(&key).await? {
            if entry_is_live(&existing, Utc::now().timestamp()) {
                return Ok(true);
            }
        }

        let now = Utc::now().timestamp();
        let valid_until = now + self.grace_period_secs;
        let ttl_secs = (exp - now).max(0) + self.grace_period_secs;
        let ttl_minutes = (ttl_secs + 59) / 60;

        debug!(key = %key, valid_until, ttl_minutes, "blacklisting token");
        self.storage
            .add(&key, json!({ "valid_until": valid_until }), ttl_minutes)
            .await?;
        Ok(true)
    }

    /// Whether the claim set is currently blacklisted.
    ///
    /// A grace-window record counts while `valid_until` has not passed; the
    /// permanent marker always counts.
    pub async fn has(&self, claims: &ClaimSet) -> Result<bool> {
        let key = self.key_for(claims)?;

        match self.storage.get(&key).await? {
            None => Ok(false),
            Some(value) => Ok(entry_is_live(&value, Utc::now().timestamp())),
        }
    }

    /// Removes the entry for a claim set.
    pub async fn remove(&self, claims: &ClaimSet) -> Result<bool> {
        let key = self.key_for(claims)?;
        self.storage.destroy(&key).await
    }

    /// Erases all entries.
    pub async fn clear(&self) -> Result<bool> {
        self.storage.flush().await?;
        Ok(true)
    }
}
