use super::posts::CommentRow;
use super::{db_error, db_error_with, PostgresStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    AuthoredComment, Comment, CommentRepository, CommentWithAuthor, PublicUser, Result,
};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct CommentAuthorRow {
    id: Uuid,
    content: String,
    post_id: Uuid,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_name: String,
    author_email: String,
    author_admin_id: Option<Uuid>,
}

impl From<CommentAuthorRow> for CommentWithAuthor {
    fn from(row: CommentAuthorRow) -> Self {
        Self {
            author: PublicUser {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
                admin_id: row.author_admin_id,
            },
            comment: Comment {
                id: row.id,
                content: row.content,
                post_id: row.post_id,
                author_id: row.author_id,
                created_at: row.created_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthoredCommentRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CommentRepository for PostgresStore {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, content, post_id, author_id, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error_with(
            "Comment already exists",
            "Post or author does not exist",
        ))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, content, post_id, author_id, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Comment::from))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentAuthorRow>(
            "SELECT c.id, c.content, c.post_id, c.created_at, \
                    u.id AS author_id, u.name AS author_name, u.email AS author_email, \
                    u.admin_id AS author_admin_id \
             FROM comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.post_id = $1 \
             ORDER BY c.created_at DESC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredComment>> {
        let rows = sqlx::query_as::<_, AuthoredCommentRow>(
            "SELECT id, content, created_at FROM comments \
             WHERE author_id = $1 ORDER BY created_at DESC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows
            .into_iter()
            .map(|row| AuthoredComment {
                id: row.id,
                content: row.content,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
