//! Handler tests with mocked ports: each checks one status/body mapping.

use api_adapters::{router, AppState, Metrics, DEFAULT_BODY_LIMIT};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use domains::{
    Category, Comment, DomainError, MockCategoryRepository, MockCommentRepository,
    MockCredentialHasher, MockPostRepository, MockTokenIssuer, MockUserRepository, Post,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use services::{AuthService, CategoryService, CommentService, PostService};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Default)]
struct Mocks {
    users: MockUserRepository,
    posts: MockPostRepository,
    comments: MockCommentRepository,
    categories: MockCategoryRepository,
    hasher: MockCredentialHasher,
    tokens: MockTokenIssuer,
}

impl Mocks {
    fn into_app(self) -> Router {
        let state = AppState {
            auth: Arc::new(AuthService::new(
                Arc::new(self.users),
                Arc::new(self.hasher),
                Arc::new(self.tokens),
            )),
            posts: Arc::new(PostService::new(Arc::new(self.posts))),
            comments: Arc::new(CommentService::new(Arc::new(self.comments))),
            categories: Arc::new(CategoryService::new(Arc::new(self.categories))),
            metrics: Arc::new(Metrics::new()),
        };
        router(state, DEFAULT_BODY_LIMIT)
    }
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn categories_are_returned_as_a_bare_array() {
    let mut mocks = Mocks::default();
    mocks.categories.expect_list().returning(|| {
        Ok(vec![Category {
            id: Uuid::new_v4(),
            name: "Rust".into(),
        }])
    });

    let (status, body) = send(mocks.into_app(), Method::GET, "/api/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Rust");
}

#[tokio::test]
async fn internal_failures_use_the_route_message() {
    let mut mocks = Mocks::default();
    mocks
        .posts
        .expect_list_summaries()
        .returning(|| Err(DomainError::internal("connection reset by peer")));

    let (status, body) = send(mocks.into_app(), Method::GET, "/api/allposts", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to retrieve posts" }));
}

#[tokio::test]
async fn signup_with_missing_fields_is_a_bad_request() {
    let mut mocks = Mocks::default();
    mocks.users.expect_insert().never();

    let (status, body) = send(
        mocks.into_app(),
        Method::POST,
        "/api/signup",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name, email, and password are required");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_with_an_error_body() {
    let app = Mocks::default().into_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_post_with_a_non_uuid_id_is_not_found() {
    let mut mocks = Mocks::default();
    mocks.posts.expect_find_detail().never();

    let (status, body) = send(mocks.into_app(), Method::GET, "/api/posts/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn create_post_returns_the_bare_post() {
    let author_id = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks.posts.expect_insert().times(1).returning(|_| Ok(()));

    let (status, body) = send(
        mocks.into_app(),
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Hello",
            "content": "<p>World</p>",
            "category": "Programming",
            "authorId": author_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["authorId"], author_id.to_string());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn delete_post_missing_is_not_found() {
    let mut mocks = Mocks::default();
    mocks.posts.expect_find_by_id().returning(|_| Ok(None));
    mocks.posts.expect_delete().never();

    let uri = format!("/api/posts/{}", Uuid::new_v4());
    let (status, body) = send(mocks.into_app(), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn delete_post_answers_with_a_message() {
    let post_id = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks.posts.expect_find_by_id().returning(move |id| {
        Ok(Some(Post {
            id,
            title: "t".into(),
            content: "c".into(),
            category: "Travel".into(),
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }))
    });
    mocks.posts.expect_delete().times(1).returning(|_| Ok(true));

    let uri = format!("/api/posts/{post_id}");
    let (status, body) = send(mocks.into_app(), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Post deleted successfully" }));
}

fn comment_by(author_id: Uuid, post_id: Uuid) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        content: "first!".into(),
        post_id,
        author_id,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn delete_comment_without_a_body_is_forbidden() {
    let post_id = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks
        .comments
        .expect_find_by_id()
        .returning(move |_| Ok(Some(comment_by(Uuid::new_v4(), post_id))));
    mocks.comments.expect_delete().never();

    let uri = format!("/api/posts/{post_id}/comments/{}", Uuid::new_v4());
    let (status, body) = send(mocks.into_app(), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn delete_comment_by_its_author_succeeds() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let mut mocks = Mocks::default();
    mocks
        .comments
        .expect_find_by_id()
        .returning(move |_| Ok(Some(comment_by(author_id, post_id))));
    mocks.comments.expect_delete().times(1).returning(|_| Ok(true));

    let uri = format!("/api/posts/{post_id}/comments/{}", Uuid::new_v4());
    let (status, body) = send(
        mocks.into_app(),
        Method::DELETE,
        &uri,
        Some(json!({ "userId": author_id })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted successfully");
}

#[tokio::test]
async fn user_listings_with_a_non_uuid_id_are_empty() {
    let mut mocks = Mocks::default();
    mocks.posts.expect_list_by_author().never();
    mocks.comments.expect_list_by_author().never();
    let app = mocks.into_app();

    let (status, body) = send(app.clone(), Method::GET, "/api/users/abc/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "posts": [] }));

    let (status, body) = send(app, Method::GET, "/api/users/abc/comments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "comments": [] }));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let mut mocks = Mocks::default();
    mocks.categories.expect_list().returning(|| Ok(Vec::new()));

    let response = mocks
        .into_app()
        .oneshot(
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_endpoint_counts_failed_signups() {
    let app = Mocks::default().into_app();
    let (status, _) = send(
        app.clone(),
        Method::POST,
        "/api/signup",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#"blog_events_total{event="signup",outcome="failure"} 1"#));
}

fn post_with_content(content: String) -> Value {
    json!({
        "title": "Long read",
        "content": content,
        "category": "Programming",
        "authorId": Uuid::new_v4(),
    })
}

#[tokio::test]
async fn bodies_above_the_axum_default_but_within_the_cap_are_accepted() {
    let mut mocks = Mocks::default();
    mocks.posts.expect_insert().times(1).returning(|_| Ok(()));
    let content = "x".repeat(3 * 1024 * 1024);

    let (status, body) = send(
        mocks.into_app(),
        Method::POST,
        "/api/posts",
        Some(post_with_content(content)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"].as_str().map(str::len), Some(3 * 1024 * 1024));
}

#[tokio::test]
async fn bodies_over_the_cap_are_payload_too_large() {
    let mut mocks = Mocks::default();
    mocks.posts.expect_insert().never();
    let content = "x".repeat(DEFAULT_BODY_LIMIT + 1024 * 1024);

    let (status, body) = send(
        mocks.into_app(),
        Method::POST,
        "/api/posts",
        Some(post_with_content(content)),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn preflight_from_any_origin_is_allowed() {
    let response = Mocks::default()
        .into_app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/posts")
                .header(header::ORIGIN, "https://reader.example.net")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn form_encoded_signup_reaches_the_service() {
    let mut mocks = Mocks::default();
    mocks.users.expect_find_by_email().returning(|_| Ok(None));
    mocks.users.expect_insert().times(1).returning(|_| Ok(()));
    mocks
        .hasher
        .expect_hash()
        .returning(|pw| Ok(format!("hashed:{pw}")));

    let response = mocks
        .into_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/signup")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Ada&email=ada%40example.com&password=pw12345"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}
