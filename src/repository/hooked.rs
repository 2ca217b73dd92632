//! Repository wrapper that runs a callback just before its next write.
//!
//! Lets service tests interleave another request between a service's own
//! reads and the write that follows them.

use std::sync::{Arc, Mutex};

use super::{GroupRecord, InMemoryRepository, PostRecord, Rename, Repository, UserRecord};

type Hook = Box<dyn FnOnce() + Send>;

pub(crate) struct HookedRepository {
    inner: Arc<InMemoryRepository>,
    before_write: Mutex<Option<Hook>>,
}

impl HookedRepository {
    pub(crate) fn new(inner: Arc<InMemoryRepository>) -> Self {
        Self {
            inner,
            before_write: Mutex::new(None),
        }
    }

    /// Runs `hook` once, before the next write reaches the inner repository.
    pub(crate) fn before_next_write(&self, hook: impl FnOnce() + Send + 'static) {
        *self.before_write.lock().unwrap() = Some(Box::new(hook));
    }

    fn fire(&self) {
        // Taken before running so writes made by the hook pass straight through
        let hook = self.before_write.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl Repository for HookedRepository {
    fn create_user(&self, username: &str) -> Option<UserRecord> {
        self.fire();
        self.inner.create_user(username)
    }

    fn find_user(&self, id: i64) -> Option<UserRecord> {
        self.inner.find_user(id)
    }

    fn find_user_by_username(&self, username: &str) -> Option<UserRecord> {
        self.inner.find_user_by_username(username)
    }

    fn search_users(&self, fragment: &str) -> Vec<UserRecord> {
        self.inner.search_users(fragment)
    }

    fn users_by_post_content(&self, fragment: &str) -> Vec<UserRecord> {
        self.inner.users_by_post_content(fragment)
    }

    fn rename_user(&self, id: i64, username: &str) -> Rename {
        self.fire();
        self.inner.rename_user(id, username)
    }

    fn delete_user(&self, id: i64) -> bool {
        self.fire();
        self.inner.delete_user(id)
    }

    fn create_post(&self, user_id: i64, content: &str) -> Option<PostRecord> {
        self.fire();
        self.inner.create_post(user_id, content)
    }

    fn find_post(&self, id: i64) -> Option<PostRecord> {
        self.inner.find_post(id)
    }

    fn posts_by_user(&self, user_id: i64) -> Vec<PostRecord> {
        self.inner.posts_by_user(user_id)
    }

    fn update_post(&self, id: i64, content: &str) -> bool {
        self.fire();
        self.inner.update_post(id, content)
    }

    fn delete_post(&self, id: i64) -> bool {
        self.fire();
        self.inner.delete_post(id)
    }

    fn create_group(&self, name: &str) -> Option<GroupRecord> {
        self.fire();
        self.inner.create_group(name)
    }

    fn find_group(&self, id: i64) -> Option<GroupRecord> {
        self.inner.find_group(id)
    }

    fn find_group_by_name(&self, name: &str) -> Option<GroupRecord> {
        self.inner.find_group_by_name(name)
    }

    fn all_groups(&self) -> Vec<GroupRecord> {
        self.inner.all_groups()
    }

    fn rename_group(&self, id: i64, name: &str) -> Rename {
        self.fire();
        self.inner.rename_group(id, name)
    }

    fn delete_group(&self, id: i64) -> bool {
        self.fire();
        self.inner.delete_group(id)
    }

    fn add_member(&self, user_id: i64, group_id: i64) -> bool {
        self.fire();
        self.inner.add_member(user_id, group_id)
    }

    fn remove_member(&self, user_id: i64, group_id: i64) -> bool {
        self.fire();
        self.inner.remove_member(user_id, group_id)
    }

    fn groups_of(&self, user_id: i64) -> Vec<GroupRecord> {
        self.inner.groups_of(user_id)
    }

    fn members_of(&self, group_id: i64) -> Vec<UserRecord> {
        self.inner.members_of(group_id)
    }
}
