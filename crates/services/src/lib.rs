//! # services
//!
//! Application services for rusty-blog. Each service validates its input,
//! enforces ownership rules, and delegates persistence to the ports it was
//! constructed with.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod posts;

pub use auth::{AuthService, LoginOutcome};
pub use categories::{CategoryService, DEFAULT_CATEGORIES};
pub use comments::CommentService;
pub use posts::PostService;

use uuid::Uuid;

/// Parses an identifier supplied by a client. Anything that is not a UUID
/// cannot name an existing row, so callers treat `None` as "absent".
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
