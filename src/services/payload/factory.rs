//! Payload factory implementation.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::token::ClaimSet;
use crate::errors::{Result, TokenError};

/// Default token lifetime in minutes.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Default issuer claim.
pub const DEFAULT_ISSUER: &str = "tokengate";

/// Claims generated by the factory that custom claims may never override.
const PROTECTED_CLAIMS: [&str; 3] = ["iat", "nbf", "jti"];

/// Validation mode for decoding and claim checks.
///
/// Passed explicitly on every call; there is no shared refresh-flow toggle,
/// so concurrent refreshes cannot race each other's validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Full validation; a present `exp` in the past is rejected.
    Strict,
    /// Exempts expiry only, for decoding a token that is being exchanged
    /// for a new one. Ordering and not-before checks still apply.
    RefreshExempt,
}

/// Builds and validates claim sets.
///
/// Merges process defaults (`iss`, fresh `iat`/`nbf`/`exp` from the
/// configured TTL, freshly generated `jti`) with supplied custom claims.
#[derive(Debug, Clone)]
pub struct PayloadFactory {
    issuer: String,
    /// Token lifetime; `None` mints tokens without an expiry
    ttl_minutes: Option<i64>,
}

impl Default for PayloadFactory {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            ttl_minutes: Some(DEFAULT_TTL_MINUTES),
        }
    }
}

impl PayloadFactory {
    pub fn new(issuer: impl Into<String>, ttl_minutes: Option<i64>) -> Self {
        Self {
            issuer: issuer.into(),
            ttl_minutes,
        }
    }

    /// Builds a fresh claim set from custom claims.
    ///
    /// `custom` must carry a string `sub`. It may override `iss` and `exp`;
    /// the protected claims (`iat`, `nbf`, `jti`) are always generated here
    /// and attempting to supply them fails with
    /// [`TokenError::InvalidClaim`] listing each offender.
    pub fn make(&self, mut custom: BTreeMap<String, Value>) -> Result<ClaimSet> {
        let mut violations: Vec<String> = PROTECTED_CLAIMS
            .iter()
            .filter(|name| custom.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        let sub = match custom.remove("sub") {
            Some(Value::String(sub)) => Some(sub),
            _ => {
                violations.push("sub".to_string());
                None
            }
        };

        let iss = match custom.remove("iss") {
            Some(Value::String(iss)) => Some(iss),
            Some(_) => {
                violations.push("iss".to_string());
                None
            }
            None => None,
        };

        let exp_override = match custom.remove("exp") {
            Some(value) => match value.as_i64() {
                Some(exp) => Some(exp),
                None => {
                    violations.push("exp".to_string());
                    None
                }
            },
            None => None,
        };

        if !violations.is_empty() {
            return Err(TokenError::InvalidClaim { claims: violations });
        }
        let Some(sub) = sub else {
            return Err(TokenError::InvalidClaim {
                claims: vec!["sub".to_string()],
            });
        };

        let now = Utc::now();
        let exp = exp_override.or_else(|| {
            self.ttl_minutes
                .map(|ttl| (now + Duration::minutes(ttl)).timestamp())
        });

        let claims = ClaimSet {
            sub,
            iss: iss.unwrap_or_else(|| self.issuer.clone()),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
            custom,
        };

        self.validate(&claims, ValidationMode::Strict)?;
        Ok(claims)
    }

    /// Builds the successor claim set for a refreshed token.
    ///
    /// Carries forward the subject, the original issued-at and the custom
    /// claims; everything else (`nbf`, `exp`, `jti`) is minted fresh. This
    /// is the one sanctioned override of a protected claim.
    pub fn make_refreshed(
        &self,
        sub: String,
        iat: i64,
        custom: BTreeMap<String, Value>,
    ) -> Result<ClaimSet> {
        let now = Utc::now();
        let claims = ClaimSet {
            sub,
            iss: self.issuer.clone(),
            iat,
            nbf: now.timestamp(),
            exp: self
                .ttl_minutes
                .map(|ttl| (now + Duration::minutes(ttl)).timestamp()),
            jti: Uuid::new_v4().to_string(),
            custom,
        };

        self.validate(&claims, ValidationMode::Strict)?;
        Ok(claims)
    }

    /// Validates a claim set under the given mode.
    ///
    /// Structural violations are collected and returned together as
    /// [`TokenError::InvalidClaim`]. A present expiry in the past is a
    /// distinct [`TokenError::TokenExpired`] and is only enforced in
    /// [`ValidationMode::Strict`].
    pub fn validate(&self, claims: &ClaimSet, mode: ValidationMode) -> Result<()> {
        let now = Utc::now().timestamp();
        let mut violations = Vec::new();

        if claims.iat > now {
            violations.push("iat".to_string());
        }
        if claims.nbf > now {
            violations.push("nbf".to_string());
        }
        if let Some(exp) = claims.exp {
            if claims.nbf < claims.iat {
                violations.push("nbf".to_string());
            }
            if exp <= claims.nbf {
                violations.push("exp".to_string());
            }
        }

        if !violations.is_empty() {
            violations.dedup();
            return Err(TokenError::InvalidClaim { claims: violations });
        }

        if mode == ValidationMode::Strict && claims.is_expired() {
            return Err(TokenError::TokenExpired);
        }

        Ok(())
    }
}
