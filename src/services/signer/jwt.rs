//! JWT signer backed by `jsonwebtoken`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{ClaimSet, Token};
use crate::errors::{Result, TokenError};

use super::Signer;

/// Configuration for the JWT signer.
#[derive(Debug, Clone)]
pub struct JwtSignerConfig {
    /// Signing secret (symmetric algorithms)
    pub secret: String,
    /// Signing algorithm
    pub algorithm: Algorithm,
}

impl Default for JwtSignerConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
        }
    }
}

/// [`Signer`] implementation producing HMAC-signed JWTs.
///
/// Expiry and not-before are deliberately not validated here; the payload
/// factory owns temporal checks so the refresh flow can decode an expired
/// token. Signature and structural integrity are still enforced on every
/// decode.
pub struct JwtSigner {
    config: JwtSignerConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(config: JwtSignerConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }
}

impl Default for JwtSigner {
    fn default() -> Self {
        Self::new(JwtSignerConfig::default())
    }
}

impl Signer for JwtSigner {
    fn encode(&self, claims: &ClaimSet) -> Result<Token> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map(Token::new)
            .map_err(|_| TokenError::Encoding)
    }

    fn decode(&self, token: &Token) -> Result<ClaimSet> {
        decode::<ClaimSet>(token.as_str(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn claims(exp: Option<i64>) -> ClaimSet {
        let now = Utc::now().timestamp();
        let mut custom = BTreeMap::new();
        custom.insert("role".to_string(), json!("admin"));
        ClaimSet {
            sub: "user-1".to_string(),
            iss: "tokengate".to_string(),
            iat: now,
            nbf: now,
            exp,
            jti: "jti-1".to_string(),
            custom,
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let signer = JwtSigner::default();
        let claims = claims(Some(Utc::now().timestamp() + 3600));

        let token = signer.encode(&claims).unwrap();
        let decoded = signer.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_still_decodes() {
        // Temporal enforcement belongs to the payload factory, not the signer.
        let signer = JwtSigner::default();
        let claims = claims(Some(Utc::now().timestamp() - 3600));

        let token = signer.encode(&claims).unwrap();
        assert!(signer.decode(&token).is_ok());
    }

    #[test]
    fn test_bad_signature_rejected() {
        let signer = JwtSigner::default();
        let other = JwtSigner::new(JwtSignerConfig {
            secret: "a-different-secret".to_string(),
            ..JwtSignerConfig::default()
        });
        let token = other.encode(&claims(None)).unwrap();

        assert!(matches!(
            signer.decode(&token),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_input_rejected() {
        let signer = JwtSigner::default();
        assert!(matches!(
            signer.decode(&Token::new("not.a.jwt")),
            Err(TokenError::InvalidToken)
        ));
    }
}
