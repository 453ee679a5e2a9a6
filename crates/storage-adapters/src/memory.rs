//! # In-memory store
//!
//! DashMap-backed implementation of every repository port. It enforces the
//! same constraints as the relational schema: unique email, existing
//! author/post references, and cascading comment removal on post delete.
//!
//! Rows carry an insertion sequence number so that "newest first" stays
//! deterministic when two rows share a timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use domains::{
    Admin, AuthoredComment, AuthoredPost, Category, CategoryRepository, Comment,
    CommentRepository, CommentWithAuthor, DomainError, Post, PostDetail, PostRepository,
    PostSummary, PublicUser, Result, User, UserRepository,
};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Stamped<T> {
    seq: u64,
    row: T,
}

#[derive(Default)]
pub struct InMemoryStore {
    seq: AtomicU64,
    users: DashMap<Uuid, User>,
    /// email -> user id; the uniqueness index.
    emails: DashMap<String, Uuid>,
    /// user id -> admin grant
    admins: DashMap<Uuid, Admin>,
    posts: DashMap<Uuid, Stamped<Post>>,
    comments: DashMap<Uuid, Stamped<Comment>>,
    categories: DashMap<Uuid, Category>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    fn author(&self, id: Uuid) -> Result<PublicUser> {
        self.users
            .get(&id)
            .map(|u| u.to_public())
            .ok_or_else(|| DomainError::internal(format!("dangling author reference {id}")))
    }

    fn comments_where(&self, pred: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let mut rows: Vec<Stamped<Comment>> = self
            .comments
            .iter()
            .filter(|e| pred(&e.row))
            .map(|e| e.value().clone())
            .collect();
        newest_first(&mut rows, |c| c.created_at);
        rows.into_iter().map(|s| s.row).collect()
    }

    fn posts_where(&self, pred: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut rows: Vec<Stamped<Post>> = self
            .posts
            .iter()
            .filter(|e| pred(&e.row))
            .map(|e| e.value().clone())
            .collect();
        newest_first(&mut rows, |p| p.created_at);
        rows.into_iter().map(|s| s.row).collect()
    }
}

fn newest_first<T>(rows: &mut [Stamped<T>], created_at: impl Fn(&T) -> DateTime<Utc>) {
    rows.sort_by_key(|s| Reverse((created_at(&s.row), s.seq)));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict("User already exists".into())),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.emails.get(email).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_admin(&self, user_id: Uuid) -> Result<Option<Admin>> {
        Ok(self.admins.get(&user_id).map(|a| a.value().clone()))
    }

    async fn upsert_admin(&self, user_id: Uuid, admin_id: Uuid) -> Result<Admin> {
        if !self.users.contains_key(&user_id) {
            return Err(DomainError::not_found("User not found"));
        }
        let admin = self
            .admins
            .entry(user_id)
            .or_insert_with(|| Admin {
                id: admin_id,
                user_id,
            })
            .value()
            .clone();
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.admin_id = Some(admin.id);
        }
        Ok(admin)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: &Post) -> Result<()> {
        if !self.users.contains_key(&post.author_id) {
            return Err(DomainError::validation("Author does not exist"));
        }
        let seq = self.next_seq();
        self.posts.insert(
            post.id,
            Stamped {
                seq,
                row: post.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.row.clone()))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>> {
        let Some(post) = self.posts.get(&id).map(|p| p.row.clone()) else {
            return Ok(None);
        };
        Ok(Some(PostDetail {
            author: self.author(post.author_id)?,
            comments: self.comments_where(|c| c.post_id == id),
            post,
        }))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>> {
        self.posts_where(|_| true)
            .into_iter()
            .map(|post| -> Result<PostSummary> {
                let comments_count =
                    self.comments.iter().filter(|c| c.row.post_id == post.id).count() as i64;
                Ok(PostSummary {
                    author: self.author(post.author_id)?,
                    id: post.id,
                    title: post.title,
                    content: post.content,
                    category: post.category,
                    created_at: post.created_at,
                    comments_count,
                })
            })
            .collect()
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredPost>> {
        Ok(self
            .posts_where(|p| p.author_id == author_id)
            .iter()
            .map(AuthoredPost::from)
            .collect())
    }

    /// Comments are swept after the post is gone; see `CommentRepository::insert`.
    async fn delete(&self, id: Uuid) -> Result<bool> {
        if self.posts.remove(&id).is_none() {
            return Ok(false);
        }
        self.comments.retain(|_, c| c.row.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    /// The post's read guard is held until the comment is in, so a
    /// concurrent post delete either runs first or sweeps this comment too.
    async fn insert(&self, comment: &Comment) -> Result<()> {
        let post = self.posts.get(&comment.post_id);
        if post.is_none() || !self.users.contains_key(&comment.author_id) {
            return Err(DomainError::validation("Post or author does not exist"));
        }
        let seq = self.next_seq();
        self.comments.insert(
            comment.id,
            Stamped {
                seq,
                row: comment.clone(),
            },
        );
        drop(post);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.row.clone()))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        self.comments_where(|c| c.post_id == post_id)
            .into_iter()
            .map(|comment| -> Result<CommentWithAuthor> {
                Ok(CommentWithAuthor {
                    author: self.author(comment.author_id)?,
                    comment,
                })
            })
            .collect()
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<AuthoredComment>> {
        Ok(self
            .comments_where(|c| c.author_id == author_id)
            .iter()
            .map(AuthoredComment::from)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.iter().map(|c| c.value().clone()).collect())
    }

    async fn insert_missing(&self, names: Vec<String>) -> Result<u64> {
        let mut seen: HashSet<String> = self.categories.iter().map(|c| c.name.clone()).collect();
        let mut created = 0;
        for name in names {
            if seen.insert(name.clone()) {
                let id = Uuid::new_v4();
                self.categories.insert(id, Category { id, name });
                created += 1;
            }
        }
        Ok(created)
    }
}
