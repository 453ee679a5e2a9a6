//! Shared fixtures for the black-box suites: the real router and services
//! over an [`InMemoryStore`], plus request helpers.

use api_adapters::{router, AppState, Metrics, DEFAULT_BODY_LIMIT};
use auth_adapters::{JwtTokenIssuer, PasswordScheme, SchemeHasher};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::name::en::Name;
use fake::Fake;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use services::{AuthService, CategoryService, CommentService, PostService};
use std::sync::Arc;
use storage_adapters::{InMemoryStore, Repositories};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret";

/// Keeps the suites fast; production uses the configured cost.
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub tokens: Arc<JwtTokenIssuer>,
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub categories: Arc<CategoryService>,
    pub metrics: Arc<Metrics>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_scheme(PasswordScheme::Bcrypt {
            cost: TEST_BCRYPT_COST,
        })
    }

    pub fn with_scheme(scheme: PasswordScheme) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = Repositories::from_store(store.clone());
        let tokens = Arc::new(JwtTokenIssuer::new(TEST_JWT_SECRET, 3600));

        let auth = Arc::new(AuthService::new(
            repos.users,
            Arc::new(SchemeHasher::new(scheme)),
            tokens.clone(),
        ));
        let posts = Arc::new(PostService::new(repos.posts));
        let comments = Arc::new(CommentService::new(repos.comments));
        let categories = Arc::new(CategoryService::new(repos.categories));
        let metrics = Arc::new(Metrics::new());

        let state = AppState {
            auth: auth.clone(),
            posts: posts.clone(),
            comments: comments.clone(),
            categories: categories.clone(),
            metrics: metrics.clone(),
        };

        Self {
            router: router(state, DEFAULT_BODY_LIMIT),
            store,
            tokens,
            auth,
            posts,
            comments,
            categories,
            metrics,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        match body {
            Some(body) => {
                self.send(method, uri, Some("application/json"), body.to_string())
                    .await
            }
            None => self.send(method, uri, None, String::new()).await,
        }
    }

    /// Sends an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&self, uri: &str, encoded: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            encoded.to_string(),
        )
        .await
    }

    /// Sends `body` as is, with an optional content type.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::DELETE, uri, body).await
    }

    /// Signs up a fresh user and returns its public record.
    pub async fn signup_user(&self) -> TestUser {
        let credentials = Credentials::fake();
        let response = self.post("/api/signup", credentials.signup_body()).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        let id = response.body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("signup returns the user id");
        TestUser { id, credentials }
    }

    pub async fn create_post(&self, author_id: Uuid, title: &str) -> Value {
        let response = self
            .post(
                "/api/posts",
                json!({
                    "title": title,
                    "content": format!("<p>{title}</p>"),
                    "category": "Programming",
                    "authorId": author_id,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }

    pub async fn create_comment(&self, post_id: &str, author_id: Uuid, content: &str) -> Value {
        let response = self
            .post(
                &format!("/api/posts/{post_id}/comments"),
                json!({ "content": content, "authorId": author_id }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["comment"].clone()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> Option<&str> {
        self.body["error"].as_str()
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Generated credentials; the email is prefixed to stay unique per run.
    pub fn fake() -> Self {
        let email: String = SafeEmail().fake();
        Self {
            name: Name().fake(),
            email: format!("{}.{email}", Uuid::new_v4().simple()),
            password: Password(8..16).fake(),
        }
    }

    pub fn signup_body(&self) -> Value {
        json!({ "name": self.name, "email": self.email, "password": self.password })
    }

    pub fn login_body(&self) -> Value {
        json!({ "email": self.email, "password": self.password })
    }
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub credentials: Credentials,
}
