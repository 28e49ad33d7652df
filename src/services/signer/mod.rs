//! Signing capability: turning claim sets into opaque token strings and back.

mod jwt;

pub use jwt::{JwtSigner, JwtSignerConfig};

use crate::domain::entities::token::{ClaimSet, Token};
use crate::errors::Result;

/// Cryptographic signing/verification capability.
///
/// `decode` authenticates the signature and structure only; temporal claims
/// (`exp`, `nbf`) are enforced by the payload factory so the refresh path can
/// accept an already-expired token.
pub trait Signer: Send + Sync {
    /// Encode a claim set into a signed token.
    ///
    /// Fails with [`crate::TokenError::Encoding`] if signing fails.
    fn encode(&self, claims: &ClaimSet) -> Result<Token>;

    /// Decode a token back into its claim set.
    ///
    /// Fails with [`crate::TokenError::InvalidToken`] on a bad signature or
    /// malformed structure.
    fn decode(&self, token: &Token) -> Result<ClaimSet>;
}
