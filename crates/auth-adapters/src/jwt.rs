//! # JWT issuer
//!
//! HS256 implementation of `TokenIssuer`. The secret is handed in by the
//! caller (sourced from configuration); nothing here has a built-in key.

use chrono::Utc;
use domains::{DomainError, Result, TokenClaims, TokenIssuer};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Lifetime of an issued token when not configured otherwise.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: Uuid, admin: bool) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id,
            admin,
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                DomainError::Unauthorized("Invalid token".into())
            })
    }
}
