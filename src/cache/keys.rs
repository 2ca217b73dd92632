//! Cache Key Module
//!
//! Typed cache keys and invalidation prefixes used by the service layer.
//! The store itself only ever sees the rendered strings.

use std::fmt;

/// Prefix shared by every content-search entry.
pub const USERS_BY_POST_CONTENT_PREFIX: &str = "users_by_post_content_";

// == Cache Key ==
/// Identifies one cached view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A user with posts and groups, `user_<id>`
    User(i64),
    /// Posts authored by a user, `user_posts_<id>`
    UserPosts(i64),
    /// A group with its members, `group_<id>`
    Group(i64),
    /// A group looked up by name, `group_by_name_<name>`
    GroupByName(String),
    /// Every group, `groups_all`
    AllGroups,
    /// Users whose posts contain a fragment, `users_by_post_content_<fragment>`
    UsersByPostContent(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::User(id) => write!(f, "user_{}", id),
            CacheKey::UserPosts(id) => write!(f, "user_posts_{}", id),
            CacheKey::Group(id) => write!(f, "group_{}", id),
            CacheKey::GroupByName(name) => write!(f, "group_by_name_{}", name),
            CacheKey::AllGroups => write!(f, "{}all", CachePrefix::Groups.as_str()),
            CacheKey::UsersByPostContent(content) => {
                write!(f, "{}{}", USERS_BY_POST_CONTENT_PREFIX, content)
            }
        }
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}

impl From<&CacheKey> for String {
    fn from(key: &CacheKey) -> Self {
        key.to_string()
    }
}

// == Cache Prefix ==
/// A family of cache entries invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePrefix {
    /// Group listings
    Groups,
    /// Content-search results
    UsersByPostContent,
    /// Results keyed by post content
    PostContent,
}

impl CachePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePrefix::Groups => "groups_",
            CachePrefix::UsersByPostContent => USERS_BY_POST_CONTENT_PREFIX,
            CachePrefix::PostContent => "post_content_",
        }
    }
}

impl fmt::Display for CachePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
