//! Post operations.

use std::sync::Arc;

use tracing::{debug, info};

use super::{invalid, read_through, ViewCache};
use crate::cache::{CacheKey, CachePrefix};
use crate::error::{AppError, Result};
use crate::models::requests::validate_content;
use crate::models::PostView;
use crate::repository::{PostRecord, Repository};

pub struct PostService {
    repo: Arc<dyn Repository>,
    cache: ViewCache,
}

impl PostService {
    pub fn new(repo: Arc<dyn Repository>, cache: ViewCache) -> Self {
        Self { repo, cache }
    }

    // == User Posts ==
    /// Returns the posts written by a user.
    ///
    /// A user without posts (or a missing user) is reported as not found.
    pub fn user_posts(&self, user_id: i64) -> Result<Vec<PostView>> {
        read_through(&self.cache, CacheKey::UserPosts(user_id), || {
            debug!("[DB] Fetching posts for user {} from database", user_id);
            let posts = self.repo.posts_by_user(user_id);
            if posts.is_empty() {
                return Err(AppError::NotFound(format!(
                    "No posts found for user {}",
                    user_id
                )));
            }
            Ok(posts.into_iter().map(PostView::from).collect())
        })
    }

    // == Create ==
    pub fn create(&self, user_id: i64, content: &str) -> Result<PostView> {
        invalid(validate_content(content))?;
        let post = self
            .repo
            .create_post(user_id, content)
            .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", user_id)))?;

        self.invalidate_author(post.user_id);
        info!("User {} created post {}", user_id, post.id);
        Ok(PostView::from(post))
    }

    // == Update ==
    pub fn update(&self, post_id: i64, content: &str) -> Result<PostView> {
        invalid(validate_content(content))?;
        let post = self.find(post_id)?;

        if !self.repo.update_post(post_id, content) {
            return Err(post_not_found(post_id));
        }
        self.invalidate_author(post.user_id);
        self.cache.evict_family(CachePrefix::PostContent);
        info!("Updated post {}", post_id);

        Ok(PostView {
            id: post_id,
            content: content.to_string(),
        })
    }

    // == Delete ==
    pub fn delete(&self, post_id: i64) -> Result<i64> {
        let post = self.find(post_id)?;

        if !self.repo.delete_post(post_id) {
            return Err(post_not_found(post_id));
        }
        self.invalidate_author(post.user_id);
        info!("Deleted post {}", post_id);
        Ok(post_id)
    }

    fn find(&self, post_id: i64) -> Result<PostRecord> {
        self.repo
            .find_post(post_id)
            .ok_or_else(|| post_not_found(post_id))
    }

    /// The author's post list and user view embed posts, and any
    /// content search may now match differently.
    fn invalidate_author(&self, user_id: i64) {
        self.cache.evict_key(&CacheKey::UserPosts(user_id));
        self.cache.evict_key(&CacheKey::User(user_id));
        self.cache.invalidate_user_cache();
    }
}

fn post_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Post not found with id: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{SharedCache, DEFAULT_TTL};
    use crate::models::CachedView;
    use crate::repository::hooked::HookedRepository;
    use crate::repository::InMemoryRepository;
    use tokio_test::assert_ok;

    fn setup() -> (PostService, Arc<InMemoryRepository>, ViewCache) {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = SharedCache::with_capacity(100, DEFAULT_TTL);
        let service = PostService::new(repo.clone(), cache.clone());
        (service, repo, cache)
    }

    #[test]
    fn test_user_without_posts_is_not_found() {
        let (service, repo, cache) = setup();
        let alice = repo.create_user("alice").unwrap();

        let result = service.user_posts(alice.id);

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let (service, repo, _) = setup();
        let alice = repo.create_user("alice").unwrap();

        let post = assert_ok!(service.create(alice.id, "hello"));
        let posts = assert_ok!(service.user_posts(alice.id));

        assert_eq!(posts, vec![post]);
    }

    #[test]
    fn test_create_for_missing_user() {
        let (service, _, _) = setup();
        let result = service.create(7, "hello");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_create_rejects_blank_content() {
        let (service, repo, _) = setup();
        let alice = repo.create_user("alice").unwrap();

        let result = service.create(alice.id, " ");
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_list_served_from_cache() {
        let (service, repo, _) = setup();
        let alice = repo.create_user("alice").unwrap();
        service.create(alice.id, "hello").unwrap();

        service.user_posts(alice.id).unwrap();
        let reads = repo.reads();
        service.user_posts(alice.id).unwrap();

        assert_eq!(repo.reads(), reads);
    }

    #[test]
    fn test_mutations_invalidate_author_views() {
        let (service, repo, cache) = setup();
        let alice = repo.create_user("alice").unwrap();
        let post = service.create(alice.id, "hello").unwrap();
        service.user_posts(alice.id).unwrap();
        cache.put(CacheKey::User(alice.id), CachedView::Users(vec![]));
        cache.put(
            CacheKey::UsersByPostContent("hello".into()),
            CachedView::Users(vec![]),
        );
        cache.put("post_content_hello", CachedView::Users(vec![]));

        let updated = service.update(post.id, "goodbye").unwrap();

        assert_eq!(updated.content, "goodbye");
        assert!(cache.is_empty());
        assert_eq!(
            service.user_posts(alice.id).unwrap()[0].content,
            "goodbye"
        );
    }

    #[test]
    fn test_delete_last_post() {
        let (service, repo, _) = setup();
        let alice = repo.create_user("alice").unwrap();
        let post = service.create(alice.id, "hello").unwrap();
        service.user_posts(alice.id).unwrap();

        assert_eq!(service.delete(post.id).unwrap(), post.id);

        assert!(matches!(
            service.user_posts(alice.id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.delete(post.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_of_post_deleted_midway_is_not_found() {
        let repo = Arc::new(InMemoryRepository::new());
        let hooked = Arc::new(HookedRepository::new(repo.clone()));
        let cache: ViewCache = SharedCache::with_capacity(100, DEFAULT_TTL);
        let service = PostService::new(hooked.clone(), cache.clone());
        let alice = repo.create_user("alice").unwrap();
        let post_id = repo.create_post(alice.id, "hello").unwrap().id;

        let rival = repo.clone();
        hooked.before_next_write(move || {
            rival.delete_post(post_id);
        });
        let result = service.update(post_id, "goodbye");

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repo.find_post(post_id).is_none());
        assert!(cache.is_empty());
    }
}
