//! Comments on posts and the per-user comment list.

use crate::parse_id;
use chrono::Utc;
use domains::{
    present, AuthoredComment, Comment, CommentRepository, CommentWithAuthor, CreateCommentInput,
    DeleteCommentInput, DomainError, Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    /// Comments on a post, newest first. An unknown post has none.
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        self.comments.list_for_post(post_id).await
    }

    /// Adds a comment under `post_id`, taken from the path as sent. The body
    /// is checked before the id, so a bad body reports its missing fields.
    pub async fn create_comment(
        &self,
        post_id: &str,
        input: CreateCommentInput,
    ) -> Result<Comment> {
        let (Some(content), Some(author_id)) =
            (present(&input.content), present(&input.author_id))
        else {
            return Err(DomainError::validation("Missing required fields"));
        };
        let post_id = parse_id(post_id)
            .ok_or_else(|| DomainError::validation("Post or author does not exist"))?;
        let author_id =
            parse_id(author_id).ok_or_else(|| DomainError::validation("Author does not exist"))?;

        let comment = Comment {
            id: Uuid::new_v4(),
            content: content.to_string(),
            post_id,
            author_id,
            created_at: Utc::now(),
        };
        self.comments.insert(&comment).await?;

        info!(comment_id = %comment.id, %post_id, %author_id, "comment created");
        Ok(comment)
    }

    /// Deletes a comment on behalf of `input.user_id`, who must be its author.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        input: DeleteCommentInput,
    ) -> Result<()> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("Comment not found"))?;

        let caller = present(&input.user_id).and_then(parse_id);
        if caller != Some(comment.author_id) {
            warn!(%comment_id, caller = ?caller, "comment delete rejected: not the author");
            return Err(DomainError::Forbidden("Unauthorized".into()));
        }

        if !self.comments.delete(comment_id).await? {
            return Err(DomainError::not_found("Comment not found"));
        }
        info!(%comment_id, %post_id, "comment deleted");
        Ok(())
    }

    pub async fn list_comments_by_user(&self, user_id: Uuid) -> Result<Vec<AuthoredComment>> {
        self.comments.list_by_author(user_id).await
    }
}
