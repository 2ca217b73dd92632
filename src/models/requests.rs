//! Request DTOs for the social network API
//!
//! Defines the structure of incoming HTTP request bodies and query strings,
//! plus the field checks services apply to them.

use serde::Deserialize;

/// Maximum accepted length for usernames and group names
pub const MAX_NAME_LENGTH: usize = 64;

/// Checks a username or group name.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_name(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    None
}

/// Checks post content.
pub fn validate_content(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return Some("Post content cannot be empty".to_string());
    }
    None
}

/// Request body for creating or renaming a user (POST /users, PUT /users/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub username: String,
}

/// Request body for creating or renaming a group (POST /groups, PUT /groups/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRequest {
    pub name: String,
}

/// Request body for creating or editing a post
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub content: String,
}

/// Query string for GET /users/search
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// Query string for GET /users/by-post-content
#[derive(Debug, Clone, Deserialize)]
pub struct ContentQuery {
    pub content: String,
}
