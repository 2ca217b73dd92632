//! Group operations.

use std::sync::Arc;

use tracing::{debug, info};

use super::{invalid, read_through, ViewCache};
use crate::cache::{CacheKey, CachePrefix};
use crate::error::{AppError, Result};
use crate::models::requests::validate_name;
use crate::models::{GroupView, GroupWithUsersView, MemberView};
use crate::repository::{GroupRecord, Rename, Repository, UserRecord};

pub struct GroupService {
    repo: Arc<dyn Repository>,
    cache: ViewCache,
}

impl GroupService {
    pub fn new(repo: Arc<dyn Repository>, cache: ViewCache) -> Self {
        Self { repo, cache }
    }

    // == All ==
    /// Returns every group with its members.
    pub fn all(&self) -> Result<Vec<GroupWithUsersView>> {
        read_through(&self.cache, CacheKey::AllGroups, || {
            debug!("[DB] Fetching all groups from database");
            Ok(self
                .repo
                .all_groups()
                .into_iter()
                .map(|group| self.with_members(group))
                .collect())
        })
    }

    // == Get One ==
    pub fn get_one(&self, id: i64) -> Result<GroupWithUsersView> {
        read_through(&self.cache, CacheKey::Group(id), || {
            debug!("[DB] Fetching group from database by id: {}", id);
            let group = self.find(id)?;
            Ok(self.with_members(group))
        })
    }

    // == Find By Name ==
    pub fn find_by_name(&self, name: &str) -> Result<GroupWithUsersView> {
        read_through(&self.cache, CacheKey::GroupByName(name.to_string()), || {
            debug!("[DB] Fetching group from database by name: {}", name);
            let group = self
                .repo
                .find_group_by_name(name)
                .ok_or_else(|| AppError::NotFound(format!("Group not found with name: {}", name)))?;
            Ok(self.with_members(group))
        })
    }

    // == Register ==
    /// Creates a group with a unique name.
    pub fn register(&self, name: &str) -> Result<GroupView> {
        invalid(validate_name("Group name", name))?;
        let group = self.repo.create_group(name).ok_or_else(|| taken(name))?;

        self.cache.evict_family(CachePrefix::Groups);
        info!("[CACHE] Invalidated groups cache after registration");

        Ok(GroupView::from(group))
    }

    // == Update ==
    /// Renames a group.
    pub fn update(&self, id: i64, name: &str) -> Result<GroupWithUsersView> {
        invalid(validate_name("Group name", name))?;
        let group = self.find(id)?;

        match self.repo.rename_group(id, name) {
            Rename::Renamed => {}
            Rename::Missing => return Err(group_not_found(id)),
            Rename::NameTaken => return Err(taken(name)),
        }
        let members = self.repo.members_of(id);
        self.cache.evict_key(&CacheKey::GroupByName(name.to_string()));
        self.invalidate_group(&group, &members);
        info!("[CACHE] Invalidated group {} cache after update", id);

        self.get_one(id)
    }

    // == Delete ==
    /// Deletes a group and all of its memberships.
    pub fn delete(&self, id: i64) -> Result<i64> {
        let group = self.find(id)?;

        // Memberships go with the group, so collect members first
        let members = self.repo.members_of(id);
        if !self.repo.delete_group(id) {
            return Err(group_not_found(id));
        }
        self.invalidate_group(&group, &members);
        info!("[CACHE] Invalidated group {} and user caches", id);

        Ok(id)
    }

    fn find(&self, id: i64) -> Result<GroupRecord> {
        self.repo
            .find_group(id)
            .ok_or_else(|| group_not_found(id))
    }

    fn with_members(&self, group: GroupRecord) -> GroupWithUsersView {
        let users = self
            .repo
            .members_of(group.id)
            .into_iter()
            .map(MemberView::from)
            .collect();

        GroupWithUsersView {
            id: group.id,
            name: group.name,
            users,
        }
    }

    /// Members' user views list the group by name, and content searches
    /// embed those user views.
    fn invalidate_group(&self, group: &GroupRecord, members: &[UserRecord]) {
        for member in members {
            self.cache.evict_key(&CacheKey::User(member.id));
        }
        self.cache.evict_key(&CacheKey::Group(group.id));
        self.cache.evict_key(&CacheKey::GroupByName(group.name.clone()));
        self.cache.evict_family(CachePrefix::Groups);
        self.cache.invalidate_user_cache();
    }
}

fn group_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Group not found with id: {}", id))
}

fn taken(name: &str) -> AppError {
    AppError::AlreadyExists(format!("Group already exists: {}", name))
}
