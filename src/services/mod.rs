//! Services Module
//!
//! Business operations over the repository, with cache-aside reads and
//! explicit invalidation after every mutation.
//!
//! Concurrent misses on the same key are not coalesced: each caller queries
//! the repository and the last `put` wins.

mod groups;
mod posts;
mod users;

pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;

use tracing::error;

use crate::cache::{CacheKey, SharedCache};
use crate::error::{AppError, Result};
use crate::models::{CachedView, Cacheable, GroupView, PostView, UserView};
use crate::repository::{Repository, UserRecord};

/// The cache handle every service shares.
pub type ViewCache = SharedCache<CachedView>;

// == Read Through ==
/// Returns the cached view for `key`, or loads and caches it on a miss.
///
/// Errors from `load` are returned as-is and nothing is cached.
pub(crate) fn read_through<T: Cacheable>(
    cache: &ViewCache,
    key: CacheKey,
    load: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let rendered = key.to_string();

    if let Some(cached) = cache.get(&rendered) {
        return T::from_cached(cached).ok_or_else(|| {
            error!("[CACHE] Unexpected value shape for key: {}", rendered);
            AppError::Internal(format!("unexpected cached value for key {}", rendered))
        });
    }

    let value = load()?;
    cache.put(rendered, value.clone().into_cached());
    Ok(value)
}

pub(crate) fn invalid(message: Option<String>) -> Result<()> {
    match message {
        Some(message) => Err(AppError::InvalidRequest(message)),
        None => Ok(()),
    }
}

/// Builds the full view of a user from the repository.
pub(crate) fn user_view(repo: &dyn Repository, user: UserRecord) -> UserView {
    let posts = repo
        .posts_by_user(user.id)
        .into_iter()
        .map(PostView::from)
        .collect();
    let groups = repo
        .groups_of(user.id)
        .into_iter()
        .map(GroupView::from)
        .collect();

    UserView {
        id: user.id,
        username: user.username,
        posts,
        groups,
    }
}
