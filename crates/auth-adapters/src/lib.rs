//! # auth-adapters
//!
//! Credential adapters for rusty-blog: password hashing (bcrypt/Argon2)
//! and, behind `auth-jwt`, HS256 bearer tokens.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::{PasswordScheme, SchemeHasher, DEFAULT_BCRYPT_COST};

#[cfg(feature = "auth-jwt")]
pub use jwt::{JwtTokenIssuer, DEFAULT_TOKEN_TTL_SECS};
