//! # DomainError
//!
//! Centralized error handling for the rusty-blog ecosystem.
//! Adapters map library failures (sqlx, bcrypt, jsonwebtoken) into these
//! variants; the HTTP layer maps each variant to exactly one status code.

use thiserror::Error;

/// The primary error type for all domain operations.
///
/// Client-facing variants carry the message that is returned to the caller
/// verbatim. `Internal` carries diagnostic detail that is logged but never
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input, or a reference to a row that does not exist.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is not the owner of the resource.
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (e.g., Post, Comment, User)
    #[error("{0}")]
    NotFound(String),

    /// A unique field is already taken (e.g., duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, hashing task panicked)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// A specialized Result type for rusty-blog logic.
pub type Result<T> = std::result::Result<T, DomainError>;
