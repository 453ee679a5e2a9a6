//! # Handlers
//!
//! One function per route. Handlers translate between HTTP and the
//! services; they hold no business rules of their own.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod metrics;
pub mod posts;
pub mod users;
