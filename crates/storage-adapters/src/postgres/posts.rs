use super::{db_error, db_error_with, PostgresStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    AuthoredPost, Comment, Post, PostDetail, PostRepository, PostSummary, PublicUser, Result,
};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    category: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

/// A post joined with its author and its comment count.
#[derive(sqlx::FromRow)]
struct PostAuthorRow {
    id: Uuid,
    title: String,
    content: String,
    category: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_name: String,
    author_email: String,
    author_admin_id: Option<Uuid>,
    comments_count: i64,
}

impl PostAuthorRow {
    fn author(&self) -> PublicUser {
        PublicUser {
            id: self.author_id,
            name: self.author_name.clone(),
            email: self.author_email.clone(),
            admin_id: self.author_admin_id,
        }
    }
}

impl From<PostAuthorRow> for PostSummary {
    fn from(row: PostAuthorRow) -> Self {
        Self {
            author: row.author(),
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            created_at: row.created_at,
            comments_count: row.comments_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthoredPostRow {
    id: Uuid,
    title: String,
    content: String,
    category: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
pub(super) struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            post_id: row.post_id,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

const POST_WITH_AUTHOR: &str = "\
    SELECT p.id, p.title, p.content, p.category, p.created_at, \
           u.id AS author_id, u.name AS author_name, u.email AS author_email, \
           u.admin_id AS author_admin_id, \
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count \
    FROM posts p \
    JOIN users u ON u.id = p.author_id";

#[async_trait]
impl PostRepository for PostgresStore {
    async fn insert(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "INSERT INTO posts (id, title, content, category, author_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.category)
        .bind(post.author_id)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error_with("Post already exists", "Author does not exist"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, category, author_id, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Post::from))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>> {
        let sql = format!("{POST_WITH_AUTHOR} WHERE p.id = $1");
        let Some(row) = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let comments = sqlx::query_as::<_, CommentRow>(
            "SELECT id, content, post_id, author_id, created_at FROM comments \
             WHERE post_id = $1 ORDER BY created_at DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(Some(PostDetail {
            author: row.author(),
            post: Post {
                id: row.id,
                title: row.title,
                content: row.content,
                category: row.category,
                author_id: row.author_id,
                created_at: row.created_at,
            },
            comments: comments.into_iter().map(Comment::from).collect(),
        }))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>> {
        let sql = format!("{POST_WITH_AUTHOR} ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, PostAuthorRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredPost>> {
        let rows = sqlx::query_as::<_, AuthoredPostRow>(
            "SELECT id, title, content, category, created_at FROM posts \
             WHERE author_id = $1 ORDER BY created_at DESC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows
            .into_iter()
            .map(|row| AuthoredPost {
                id: row.id,
                title: row.title,
                content: row.content,
                category: row.category,
                created_at: row.created_at,
            })
            .collect())
    }

    /// Comments go with the post via `ON DELETE CASCADE`.
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
