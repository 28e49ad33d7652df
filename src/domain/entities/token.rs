//! Token entities: the validated claim set and the opaque signed token.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validated collection of claims carried by a token.
///
/// The recognized claims are typed fields; anything else supplied at
/// creation time lands in `custom` and is flattened into the payload on the
/// wire. A token payload missing one of the required recognized claims fails
/// deserialization, so malformed claim sets never reach lifecycle decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject identity (opaque value)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued-at timestamp (seconds)
    pub iat: i64,

    /// Not-before timestamp (seconds)
    pub nbf: i64,

    /// Expiry timestamp; absent means the token does not expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Unique token identifier
    pub jti: String,

    /// Custom claims merged in at creation and preserved across refresh
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Looks up a claim by name, recognized or custom.
    pub fn claim(&self, name: &str) -> Option<Value> {
        match name {
            "sub" => Some(Value::String(self.sub.clone())),
            "iss" => Some(Value::String(self.iss.clone())),
            "iat" => Some(Value::from(self.iat)),
            "nbf" => Some(Value::from(self.nbf)),
            "exp" => self.exp.map(Value::from),
            "jti" => Some(Value::String(self.jti.clone())),
            other => self.custom.get(other).cloned(),
        }
    }

    /// Checks whether the claim set carries an expiry in the past.
    ///
    /// A claim set without `exp` never expires.
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => Utc::now().timestamp() >= exp,
            None => false,
        }
    }

    /// Seconds remaining until expiry, clamped at zero.
    ///
    /// Returns `None` for claim sets without `exp`.
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.exp.map(|exp| (exp - Utc::now().timestamp()).max(0))
    }
}

/// Opaque signed token string wrapping a claim set.
///
/// Immutable once created; owned by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Token {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(exp: Option<i64>) -> ClaimSet {
        let now = Utc::now().timestamp();
        ClaimSet {
            sub: "user-1".to_string(),
            iss: "tokengate".to_string(),
            iat: now,
            nbf: now,
            exp,
            jti: "jti-1".to_string(),
            custom: BTreeMap::new(),
        }
    }

    #[test]
    fn test_claim_lookup_recognized_and_custom() {
        let mut set = claims(Some(Utc::now().timestamp() + 3600));
        set.custom.insert("role".to_string(), json!("admin"));

        assert_eq!(set.claim("sub"), Some(json!("user-1")));
        assert_eq!(set.claim("jti"), Some(json!("jti-1")));
        assert_eq!(set.claim("role"), Some(json!("admin")));
        assert_eq!(set.claim("missing"), None);
    }

    #[test]
    fn test_exp_absent_never_expires() {
        let set = claims(None);
        assert!(!set.is_expired());
        assert_eq!(set.claim("exp"), None);
        assert_eq!(set.seconds_until_expiry(), None);
    }

    #[test]
    fn test_expiry_in_past() {
        let set = claims(Some(Utc::now().timestamp() - 10));
        assert!(set.is_expired());
        assert_eq!(set.seconds_until_expiry(), Some(0));
    }

    #[test]
    fn test_custom_claims_flattened_on_the_wire() {
        let mut set = claims(Some(Utc::now().timestamp() + 60));
        set.custom.insert("tenant".to_string(), json!("acme"));

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["tenant"], json!("acme"));
        assert!(json.get("custom").is_none());

        let back: ClaimSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_missing_required_claim_fails_deserialization() {
        let payload = json!({
            "sub": "user-1",
            "iss": "tokengate",
            "iat": 0,
            "nbf": 0
            // no jti
        });
        assert!(serde_json::from_value::<ClaimSet>(payload).is_err());
    }

    #[test]
    fn test_exp_omitted_when_absent() {
        let set = claims(None);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("exp").is_none());
    }
}
