//! # Ports
//!
//! Any adapter must implement these traits to be wired into the services.
//! Persistence ports receive fully-formed entities; identifiers and
//! timestamps are assigned by the services.

use crate::error::Result;
use crate::models::{
    Admin, AuthoredComment, AuthoredPost, Category, Comment, CommentWithAuthor, Post, PostDetail,
    PostSummary, TokenClaims, User,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Data persistence contract for accounts and admin grants.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already taken.
    async fn insert(&self, user: &User) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_admin(&self, user_id: Uuid) -> Result<Option<Admin>>;
    /// Creates the admin row for `user_id` if missing (using `admin_id` as its
    /// id) and links the user to it. Returns the row that is now in effect.
    async fn upsert_admin(&self, user_id: Uuid, admin_id: Uuid) -> Result<Admin>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fails with `Validation` when the author does not exist.
    async fn insert(&self, post: &Post) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>>;
    /// All posts, newest first.
    async fn list_summaries(&self) -> Result<Vec<PostSummary>>;
    /// Posts by one author, newest first.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredPost>>;
    /// Removes the post and its comments. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fails with `Validation` when the post or the author does not exist.
    async fn insert(&self, comment: &Comment) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>>;
    /// Comments on one post with their authors, newest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>>;
    /// Comments by one author, newest first.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredComment>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;
    /// Inserts each name that has no row yet. Returns how many were inserted.
    async fn insert_missing(&self, names: Vec<String>) -> Result<u64>;
}

/// One-way credential hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String>;
    /// `Ok(false)` on mismatch or on a hash this adapter cannot parse.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Bearer token issuance.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: Uuid, admin: bool) -> Result<String>;
    /// Fails with `Unauthorized` for a forged, malformed, or expired token.
    fn verify(&self, token: &str) -> Result<TokenClaims>;
}
