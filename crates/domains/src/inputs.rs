//! # Command Inputs
//!
//! Request payloads as the client sends them. Every field is optional so
//! that a missing field surfaces as a `DomainError::Validation` from the
//! service rather than as a deserialization failure.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub content: Option<String>,
    pub author_id: Option<String>,
}

/// Identity of the caller asking to delete a comment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteCommentInput {
    pub user_id: Option<String>,
}

/// Returns the value if it is present and not blank.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

/// Returns the value if it is present and non-empty. Whitespace counts;
/// passwords go through this rather than [`present`].
pub fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_fields_are_not_present() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&Some("   ".into())), None);
        assert_eq!(present(&Some("x".into())), Some("x"));
    }

    #[test]
    fn whitespace_is_a_non_empty_value() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("   ".into())), Some("   "));
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let input: CreatePostInput = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "authorId": "abc"
        }))
        .unwrap();
        assert_eq!(input.title.as_deref(), Some("Hello"));
        assert_eq!(input.author_id.as_deref(), Some("abc"));
        assert!(input.content.is_none());
    }
}
