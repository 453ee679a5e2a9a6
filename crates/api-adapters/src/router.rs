use crate::handlers::{auth, categories, comments, metrics, posts, users};
use crate::middleware::{cors_policy, propagate_request_id, set_request_id};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// 10 MB, enough for a long HTML post body.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Builds the full application: the `/api` routes, `/metrics`, and the
/// shared middleware stack.
pub fn router(state: AppState, body_limit: usize) -> Router {
    let api = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/categories", get(categories::list_categories))
        .route("/posts", post(posts::create_post))
        .route("/allposts", get(posts::list_all_posts))
        .route(
            "/posts/{post_id}",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route(
            "/posts/{post_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            axum::routing::delete(comments::delete_comment),
        )
        .route("/users/{user_id}/posts", get(users::list_posts_by_user))
        .route("/users/{user_id}/comments", get(users::list_comments_by_user));

    Router::new()
        .nest("/api", api)
        .route("/metrics", get(metrics::render))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id())
                .layer(cors_policy())
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
