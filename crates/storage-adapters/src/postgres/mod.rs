//! # PostgreSQL store
//!
//! This module implements the data mapping between the relational model in
//! `migrations/` and the `domains` models. One `PostgresStore` implements
//! every repository port over a shared `PgPool`; the per-entity impls live
//! in the submodules.

mod categories;
mod comments;
mod posts;
mod users;

use domains::DomainError;
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgPool, PgPoolOptions};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Maps a sqlx failure onto the domain taxonomy. Constraint violations
/// become client errors; everything else is `Internal`. The HTTP layer logs
/// internal failures, so only a debug trace is emitted here.
pub(crate) fn db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            ErrorKind::UniqueViolation => {
                return DomainError::Conflict("Record already exists".into())
            }
            ErrorKind::ForeignKeyViolation => {
                return DomainError::validation("Referenced record does not exist")
            }
            _ => {}
        }
    }
    tracing::debug!(error = %err, "database operation failed");
    DomainError::internal(err.to_string())
}

/// Same as [`db_error`], with a caller-specific message for constraint
/// violations.
pub(crate) fn db_error_with(
    conflict: &'static str,
    dangling: &'static str,
) -> impl Fn(sqlx::Error) -> DomainError {
    move |err| match db_error(err) {
        DomainError::Conflict(_) => DomainError::Conflict(conflict.into()),
        DomainError::Validation(_) => DomainError::validation(dangling),
        other => other,
    }
}
