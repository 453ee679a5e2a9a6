//! # api-adapters
//!
//! The HTTP entry point of the blog. Every route parses its request, makes
//! one service call and maps the result (or the `DomainError`) to JSON.

pub mod metrics;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
mod router;
#[cfg(feature = "web-axum")]
mod state;

pub use metrics::{Event, Metrics, Outcome};

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use router::{router, DEFAULT_BODY_LIMIT};
#[cfg(feature = "web-axum")]
pub use state::AppState;
