//! # storage-adapters
//!
//! Persistence adapters implementing the `domains` repository ports.
//!
//! - [`memory::InMemoryStore`] is always compiled. It backs the test suites
//!   and the `storage.backend = "memory"` demo mode.
//! - [`postgres::PostgresStore`] (feature `db-postgres`) maps the relational
//!   schema in `migrations/` through sqlx.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::InMemoryStore;

#[cfg(feature = "db-postgres")]
pub use postgres::PostgresStore;

use domains::{CategoryRepository, CommentRepository, PostRepository, UserRepository};
use std::sync::Arc;

/// One store seen through each repository port.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Repositories {
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + PostRepository + CommentRepository + CategoryRepository + 'static,
    {
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            categories: store,
        }
    }
}
