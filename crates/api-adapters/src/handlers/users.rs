//! Per-user listings backing the dashboard.

use crate::error::{ApiError, Context};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use services::parse_id;

pub async fn list_posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = match parse_id(&user_id) {
        Some(user_id) => state
            .posts
            .list_posts_by_user(user_id)
            .await
            .context("Failed to fetch posts")?,
        None => Vec::new(),
    };
    Ok(Json(json!({ "posts": posts })))
}

pub async fn list_comments_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = match parse_id(&user_id) {
        Some(user_id) => state
            .comments
            .list_comments_by_user(user_id)
            .await
            .context("Failed to fetch comments")?,
        None => Vec::new(),
    };
    Ok(Json(json!({ "comments": comments })))
}
