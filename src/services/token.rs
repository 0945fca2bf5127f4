//! Bearer-token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user id and access level.
//! Expiry is enforced entirely by the JWT validation; no token state is
//! kept server-side.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's database id.
    pub sub: i32,
    /// The user's access level at issue time ("administrator", ...).
    pub level: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier for audit trails.
    pub jti: String,
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiry_minutes: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiry_minutes: config.token_expiry_minutes,
        }
    }

    /// Sign a token for the given user.
    pub fn issue(
        &self,
        user_id: i32,
        access_level: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            level: access_level.to_string(),
            exp: now + self.expiry_minutes * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Validate signature and expiry, returning the embedded [`Claims`].
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService {
            secret: secret.to_string(),
            expiry_minutes: 60,
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = service("test-secret-that-is-long-enough-for-hmac");
        let token = tokens.issue(42, "administrator").expect("issue");

        let claims = tokens.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.level, "administrator");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let tokens = service("test-secret");

        // Build an already-expired token, well past the default leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            level: "viewer".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = service("secret-alpha").issue(1, "viewer").expect("issue");
        assert!(service("secret-bravo").verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(service("secret").verify("not-a-token").is_err());
    }
}
