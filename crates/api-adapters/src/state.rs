use crate::metrics::Metrics;
use services::{AuthService, CategoryService, CommentService, PostService};
use std::sync::Arc;

/// Shared by every request; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub categories: Arc<CategoryService>,
    pub metrics: Arc<Metrics>,
}
