//! # Password hashing
//!
//! bcrypt and Argon2 implementation of `CredentialHasher`.
//! New hashes use the configured scheme; verification recognises either
//! format from the hash prefix, so accounts created under one scheme keep
//! working after switching to the other.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use domains::{CredentialHasher, DomainError, Result};

/// Matches the cost of hashes written by the bcryptjs frontend era.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    Bcrypt { cost: u32 },
    Argon2,
}

impl Default for PasswordScheme {
    fn default() -> Self {
        Self::Bcrypt {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

pub struct SchemeHasher {
    scheme: PasswordScheme,
}

impl SchemeHasher {
    pub fn new(scheme: PasswordScheme) -> Self {
        Self { scheme }
    }
}

#[async_trait]
impl CredentialHasher for SchemeHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let scheme = self.scheme;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_with(scheme, &password))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || verify_any(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("verification task failed: {e}")))
    }
}

fn hash_with(scheme: PasswordScheme, password: &str) -> Result<String> {
    match scheme {
        PasswordScheme::Bcrypt { cost } => bcrypt::hash(password, cost)
            .map_err(|e| DomainError::internal(format!("bcrypt hashing failed: {e}"))),
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| DomainError::internal(format!("argon2 hashing failed: {e}")))
        }
    }
}

/// Unparseable or unknown hash formats never verify.
fn verify_any(password: &str, hash: &str) -> bool {
    if hash.starts_with("$argon2") {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("stored argon2 hash is malformed");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    } else if hash.starts_with("$2") {
        bcrypt::verify(password, hash).unwrap_or(false)
    } else {
        false
    }
}
