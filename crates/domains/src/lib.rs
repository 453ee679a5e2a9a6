//! rusty-blog/crates/domains/src/lib.rs
//!
//! The central domain types and port definitions for rusty-blog.

pub mod error;
pub mod inputs;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use inputs::*;
pub use models::*;
pub use ports::*;
