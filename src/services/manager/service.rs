//! Main token lifecycle manager implementation.

use tracing::debug;

use crate::domain::entities::token::{ClaimSet, Token};
use crate::errors::{Result, TokenError};
use crate::services::blacklist::Blacklist;
use crate::services::payload::{PayloadFactory, ValidationMode};
use crate::services::signer::Signer;
use crate::storage::Storage;

/// Orchestrates the token lifecycle: encoding a claim set into a token,
/// decoding and validating a token, refreshing a token while revoking its
/// predecessor, and invalidating tokens via the blacklist.
pub struct Manager<S: Signer, T: Storage> {
    signer: S,
    blacklist: Blacklist<T>,
    factory: PayloadFactory,
    blacklist_enabled: bool,
}

impl<S: Signer, T: Storage> Manager<S, T> {
    pub fn new(
        signer: S,
        blacklist: Blacklist<T>,
        factory: PayloadFactory,
        config: super::ManagerConfig,
    ) -> Self {
        Self {
            signer,
            blacklist,
            factory,
            blacklist_enabled: config.blacklist_enabled,
        }
    }

    /// Toggles whether decode/refresh/invalidate consult the blacklist.
    pub fn set_blacklist_enabled(&mut self, enabled: bool) {
        self.blacklist_enabled = enabled;
    }

    pub fn blacklist_enabled(&self) -> bool {
        self.blacklist_enabled
    }

    pub fn blacklist(&self) -> &Blacklist<T> {
        &self.blacklist
    }

    pub fn blacklist_mut(&mut self) -> &mut Blacklist<T> {
        &mut self.blacklist
    }

    pub fn factory(&self) -> &PayloadFactory {
        &self.factory
    }

    /// Encodes a claim set into a signed token.
    ///
    /// No validation is performed here; validation already happened when the
    /// claim set was built by the factory. No side effects.
    pub fn encode(&self, claims: &ClaimSet) -> Result<Token> {
        self.signer.encode(claims)
    }

    /// Decodes and fully validates a token.
    ///
    /// Fails with [`TokenError::InvalidToken`] on a bad signature,
    /// [`TokenError::TokenExpired`] on a past expiry, and
    /// [`TokenError::TokenBlacklisted`] if the token has been revoked.
    pub async fn decode(&self, token: &Token) -> Result<ClaimSet> {
        self.decode_validated(token, ValidationMode::Strict).await
    }

    /// Exchanges a token for a freshly issued successor.
    ///
    /// The incoming token may already be expired (refresh is the one
    /// operation exempt from hard expiry rejection) but not blacklisted.
    /// The old token is blacklisted strictly before the new token is
    /// encoded, so a crash between the two steps leaves at worst a revoked
    /// old token and no successor, never two live tokens.
    pub async fn refresh(&self, token: &Token) -> Result<Token> {
        let old = self
            .decode_validated(token, ValidationMode::RefreshExempt)
            .await?;

        if self.blacklist_enabled {
            self.blacklist.add(&old, false).await?;
            debug!(jti = %old.jti, "revoked predecessor token for refresh");
        }

        let next = self
            .factory
            .make_refreshed(old.sub.clone(), old.iat, old.custom.clone())?;
        debug!(old_jti = %old.jti, new_jti = %next.jti, "issuing refreshed token");
        self.signer.encode(&next)
    }

    /// Revokes a token by adding it to the blacklist.
    ///
    /// The token is fully validated first (non-refresh mode). With
    /// `force_forever` the revocation is permanent regardless of the
    /// token's expiry.
    ///
    /// Fails with [`TokenError::BlacklistDisabled`] when blacklist checking
    /// is off, before any signer or storage call.
    pub async fn invalidate(&self, token: &Token, force_forever: bool) -> Result<bool> {
        if !self.blacklist_enabled {
            return Err(TokenError::BlacklistDisabled);
        }

        let claims = self.decode_validated(token, ValidationMode::Strict).await?;
        debug!(jti = %claims.jti, force_forever, "invalidating token");
        self.blacklist.add(&claims, force_forever).await
    }

    async fn decode_validated(&self, token: &Token, mode: ValidationMode) -> Result<ClaimSet> {
        let claims = self.signer.decode(token)?;
        self.factory.validate(&claims, mode)?;

        if self.blacklist_enabled && self.blacklist.has(&claims).await? {
            return Err(TokenError::TokenBlacklisted);
        }

        Ok(claims)
    }
}
