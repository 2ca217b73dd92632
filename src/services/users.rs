//! User operations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::{invalid, read_through, user_view, ViewCache};
use crate::cache::{CacheKey, CachePrefix};
use crate::error::{AppError, Result};
use crate::models::requests::validate_name;
use crate::models::{GroupView, UserView};
use crate::repository::{GroupRecord, Rename, Repository, UserRecord};

pub struct UserService {
    repo: Arc<dyn Repository>,
    cache: ViewCache,
}

impl UserService {
    pub fn new(repo: Arc<dyn Repository>, cache: ViewCache) -> Self {
        Self { repo, cache }
    }

    // == Register ==
    /// Creates a user with a unique username.
    pub fn register(&self, username: &str) -> Result<UserView> {
        invalid(validate_name("Username", username))?;
        let user = self
            .repo
            .create_user(username)
            .ok_or_else(|| taken(username))?;

        self.cache.invalidate_user_cache();
        info!("Registered user {} with id {}", user.username, user.id);

        Ok(user_view(self.repo.as_ref(), user))
    }

    // == Bulk Register ==
    /// Creates every user whose name is not taken yet.
    ///
    /// Taken names and repeats within the batch are skipped. Any invalid
    /// name rejects the whole batch before anything is written.
    pub fn bulk_register(&self, usernames: &[String]) -> Result<Vec<UserView>> {
        for username in usernames {
            invalid(validate_name("Username", username))?;
        }

        let mut seen = HashSet::new();
        let created: Vec<UserView> = usernames
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .filter_map(|name| self.repo.create_user(name))
            .map(|user| user_view(self.repo.as_ref(), user))
            .collect();

        self.cache.invalidate_user_cache();
        info!(
            "Bulk registration created {} of {} users",
            created.len(),
            usernames.len()
        );
        Ok(created)
    }

    // == Get One ==
    /// Returns a user with their posts and groups.
    pub fn get_one(&self, id: i64) -> Result<UserView> {
        read_through(&self.cache, CacheKey::User(id), || {
            debug!("[DB] Fetching user from database by id: {}", id);
            let user = self.repo.find_user(id).ok_or_else(|| user_not_found(id))?;
            Ok(user_view(self.repo.as_ref(), user))
        })
    }

    // == Find By Post Content ==
    /// Returns the authors of posts containing `content`.
    pub fn find_by_post_content(&self, content: &str) -> Result<Vec<UserView>> {
        let key = CacheKey::UsersByPostContent(content.to_string());
        read_through(&self.cache, key, || {
            debug!("[DB] Fetching users by post content: {}", content);
            Ok(self
                .repo
                .users_by_post_content(content)
                .into_iter()
                .map(|user| user_view(self.repo.as_ref(), user))
                .collect())
        })
    }

    // == Search ==
    /// Case-insensitive username search. Not cached.
    pub fn search_by_username(&self, fragment: &str) -> Vec<UserView> {
        self.repo
            .search_users(fragment)
            .into_iter()
            .map(|user| user_view(self.repo.as_ref(), user))
            .collect()
    }

    // == Update ==
    /// Renames a user.
    pub fn update(&self, id: i64, username: &str) -> Result<UserView> {
        invalid(validate_name("Username", username))?;
        let user = self.find(id)?;

        match self.repo.rename_user(id, username) {
            Rename::Renamed => {}
            Rename::Missing => return Err(user_not_found(id)),
            Rename::NameTaken => return Err(taken(username)),
        }
        let groups = self.repo.groups_of(id);
        self.invalidate_user(id, &groups);
        info!("Renamed user {} from {} to {}", id, user.username, username);

        self.get_one(id)
    }

    // == Delete ==
    /// Deletes a user along with their posts and memberships.
    pub fn delete(&self, id: i64) -> Result<i64> {
        self.find(id)?;

        // Memberships go with the user, so collect them first
        let groups = self.repo.groups_of(id);
        if !self.repo.delete_user(id) {
            return Err(user_not_found(id));
        }
        self.invalidate_user(id, &groups);
        self.cache.evict_key(&CacheKey::UserPosts(id));
        info!("Deleted user {}", id);

        Ok(id)
    }

    // == Membership ==
    pub fn add_to_group(&self, user_id: i64, group_id: i64) -> Result<()> {
        self.find(user_id)?;
        let group = self.find_group(group_id)?;

        if !self.repo.add_member(user_id, group_id) {
            return Err(AppError::NotFound(format!(
                "User {} or group {} no longer exists",
                user_id, group_id
            )));
        }
        self.invalidate_user(user_id, std::slice::from_ref(&group));
        info!("Added user {} to group {}", user_id, group_id);
        Ok(())
    }

    pub fn remove_from_group(&self, user_id: i64, group_id: i64) -> Result<()> {
        self.find(user_id)?;
        let group = self.find_group(group_id)?;

        if !self.repo.remove_member(user_id, group_id) {
            return Err(AppError::NotFound(format!(
                "User {} is not a member of group {}",
                user_id, group_id
            )));
        }
        self.invalidate_user(user_id, std::slice::from_ref(&group));
        info!("Removed user {} from group {}", user_id, group_id);
        Ok(())
    }

    /// Groups the user belongs to. Not cached.
    pub fn groups_of(&self, user_id: i64) -> Result<Vec<GroupView>> {
        self.find(user_id)?;
        Ok(self
            .repo
            .groups_of(user_id)
            .into_iter()
            .map(GroupView::from)
            .collect())
    }

    fn find(&self, id: i64) -> Result<UserRecord> {
        self.repo.find_user(id).ok_or_else(|| user_not_found(id))
    }

    fn find_group(&self, id: i64) -> Result<GroupRecord> {
        self.repo
            .find_group(id)
            .ok_or_else(|| AppError::NotFound(format!("Group not found with id: {}", id)))
    }

    /// Drops every cached view that embeds this user: their own entry, the
    /// given groups' member lists, group listings and content searches.
    fn invalidate_user(&self, user_id: i64, groups: &[GroupRecord]) {
        self.cache.evict_key(&CacheKey::User(user_id));
        for group in groups {
            self.cache.evict_key(&CacheKey::Group(group.id));
            self.cache.evict_key(&CacheKey::GroupByName(group.name.clone()));
        }
        self.cache.evict_family(CachePrefix::Groups);
        self.cache.invalidate_user_cache();
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User not found with id: {}", id))
}

fn taken(username: &str) -> AppError {
    AppError::AlreadyExists(format!("User already exists: {}", username))
}
