//! Post creation, feed, detail, deletion, and the per-user post list.

use crate::parse_id;
use chrono::Utc;
use domains::{
    present, AuthoredPost, CreatePostInput, DomainError, Post, PostDetail, PostRepository,
    PostSummary, Result,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn create_post(&self, input: CreatePostInput) -> Result<Post> {
        let (Some(title), Some(content), Some(category), Some(author_id)) = (
            present(&input.title),
            present(&input.content),
            present(&input.category),
            present(&input.author_id),
        ) else {
            return Err(DomainError::validation(
                "Title, content, category, and author are required",
            ));
        };
        let author_id =
            parse_id(author_id).ok_or_else(|| DomainError::validation("Author does not exist"))?;

        let post = Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            author_id,
            created_at: Utc::now(),
        };
        self.posts.insert(&post).await?;

        info!(post_id = %post.id, %author_id, "post created");
        Ok(post)
    }

    /// Every post, newest first, with author and comment count.
    pub async fn list_all_posts(&self) -> Result<Vec<PostSummary>> {
        self.posts.list_summaries().await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostDetail> {
        self.posts
            .find_detail(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post not found"))
    }

    /// Deletes a post and its comments.
    ///
    /// Any caller may delete any post; only existence is checked.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("Post not found"));
        }
        if !self.posts.delete(post_id).await? {
            // Removed concurrently between the lookup and the delete.
            return Err(DomainError::not_found("Post not found"));
        }
        info!(%post_id, "post deleted");
        Ok(())
    }

    pub async fn list_posts_by_user(&self, user_id: Uuid) -> Result<Vec<AuthoredPost>> {
        self.posts.list_by_author(user_id).await
    }
}
