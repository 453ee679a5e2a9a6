use crate::error::{ApiError, Context};
use crate::extract::Payload;
use crate::metrics::Event;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domains::{CreatePostInput, DomainError};
use serde_json::json;
use services::parse_id;

fn post_not_found() -> ApiError {
    DomainError::not_found("Post not found").into()
}

pub async fn create_post(
    State(state): State<AppState>,
    Payload(input): Payload<CreatePostInput>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .metrics
        .observe(Event::PostCreated, state.posts.create_post(input).await)
        .context("Failed to create post")?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_all_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .posts
        .list_all_posts()
        .await
        .context("Failed to retrieve posts")?;
    Ok(Json(json!({ "posts": posts })))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post_id = parse_id(&post_id).ok_or_else(post_not_found)?;
    let post = state
        .posts
        .get_post(post_id)
        .await
        .context("Failed to retrieve post")?;
    Ok(Json(json!({ "post": post })))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = match parse_id(&post_id) {
        Some(post_id) => state.posts.delete_post(post_id).await,
        None => Err(DomainError::not_found("Post not found")),
    };
    state
        .metrics
        .observe(Event::PostDeleted, result)
        .context("Failed to delete post")?;
    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
