use crate::error::{ApiError, Context};
use crate::extract::{lenient_body, Payload};
use crate::metrics::Event;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use domains::{CreateCommentInput, DeleteCommentInput, DomainError};
use serde_json::json;
use services::parse_id;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = match parse_id(&post_id) {
        Some(post_id) => state
            .comments
            .list_comments(post_id)
            .await
            .context("Failed to fetch comments")?,
        None => Vec::new(),
    };
    Ok(Json(json!({ "comments": comments })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Payload(input): Payload<CreateCommentInput>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.comments.create_comment(&post_id, input).await;
    let comment = state
        .metrics
        .observe(Event::CommentCreated, result)
        .context("Failed to add comment")?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

/// The caller identifies itself with `{"userId"}` in the body, which may be
/// absent; an anonymous caller is never the author.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: DeleteCommentInput = lenient_body(&headers, &body);
    let result = match (parse_id(&post_id), parse_id(&comment_id)) {
        (Some(post_id), Some(comment_id)) => {
            state
                .comments
                .delete_comment(post_id, comment_id, input)
                .await
        }
        _ => Err(DomainError::not_found("Comment not found")),
    };
    state
        .metrics
        .observe(Event::CommentDeleted, result)
        .context("Failed to delete comment")?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
