//! In-memory repository backed by mutex-guarded tables.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{GroupRecord, PostRecord, Rename, Repository, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserRecord>,
    posts: BTreeMap<i64, PostRecord>,
    groups: BTreeMap<i64, GroupRecord>,
    /// (user_id, group_id)
    memberships: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

// == In-Memory Repository ==
/// Repository keeping all rows in process memory.
///
/// Counts read queries so callers can tell whether a request reached the
/// store or was answered from cache.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
    reads: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read queries served so far.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) -> MutexGuard<'_, Tables> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.write()
    }

    fn write(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Repository for InMemoryRepository {
    fn create_user(&self, username: &str) -> Option<UserRecord> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.username == username) {
            return None;
        }
        let user = UserRecord {
            id: tables.allocate_id(),
            username: username.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Some(user)
    }

    fn find_user(&self, id: i64) -> Option<UserRecord> {
        self.read().users.get(&id).cloned()
    }

    fn find_user_by_username(&self, username: &str) -> Option<UserRecord> {
        self.read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn search_users(&self, fragment: &str) -> Vec<UserRecord> {
        let needle = fragment.to_lowercase();
        self.read()
            .users
            .values()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn users_by_post_content(&self, fragment: &str) -> Vec<UserRecord> {
        let tables = self.read();
        let authors: BTreeSet<i64> = tables
            .posts
            .values()
            .filter(|p| p.content.contains(fragment))
            .map(|p| p.user_id)
            .collect();
        authors
            .into_iter()
            .filter_map(|id| tables.users.get(&id).cloned())
            .collect()
    }

    fn rename_user(&self, id: i64, username: &str) -> Rename {
        let mut tables = self.write();
        if tables
            .users
            .values()
            .any(|u| u.username == username && u.id != id)
        {
            return Rename::NameTaken;
        }
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.username = username.to_string();
                Rename::Renamed
            }
            None => Rename::Missing,
        }
    }

    fn delete_user(&self, id: i64) -> bool {
        let mut tables = self.write();
        if tables.users.remove(&id).is_none() {
            return false;
        }
        tables.posts.retain(|_, p| p.user_id != id);
        tables.memberships.retain(|(user_id, _)| *user_id != id);
        true
    }

    fn create_post(&self, user_id: i64, content: &str) -> Option<PostRecord> {
        let mut tables = self.write();
        if !tables.users.contains_key(&user_id) {
            return None;
        }
        let post = PostRecord {
            id: tables.allocate_id(),
            user_id,
            content: content.to_string(),
        };
        tables.posts.insert(post.id, post.clone());
        Some(post)
    }

    fn find_post(&self, id: i64) -> Option<PostRecord> {
        self.read().posts.get(&id).cloned()
    }

    fn posts_by_user(&self, user_id: i64) -> Vec<PostRecord> {
        self.read()
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    fn update_post(&self, id: i64, content: &str) -> bool {
        match self.write().posts.get_mut(&id) {
            Some(post) => {
                post.content = content.to_string();
                true
            }
            None => false,
        }
    }

    fn delete_post(&self, id: i64) -> bool {
        self.write().posts.remove(&id).is_some()
    }

    fn create_group(&self, name: &str) -> Option<GroupRecord> {
        let mut tables = self.write();
        if tables.groups.values().any(|g| g.name == name) {
            return None;
        }
        let group = GroupRecord {
            id: tables.allocate_id(),
            name: name.to_string(),
        };
        tables.groups.insert(group.id, group.clone());
        Some(group)
    }

    fn find_group(&self, id: i64) -> Option<GroupRecord> {
        self.read().groups.get(&id).cloned()
    }

    fn find_group_by_name(&self, name: &str) -> Option<GroupRecord> {
        self.read()
            .groups
            .values()
            .find(|g| g.name == name)
            .cloned()
    }

    fn all_groups(&self) -> Vec<GroupRecord> {
        self.read().groups.values().cloned().collect()
    }

    fn rename_group(&self, id: i64, name: &str) -> Rename {
        let mut tables = self.write();
        if tables.groups.values().any(|g| g.name == name && g.id != id) {
            return Rename::NameTaken;
        }
        match tables.groups.get_mut(&id) {
            Some(group) => {
                group.name = name.to_string();
                Rename::Renamed
            }
            None => Rename::Missing,
        }
    }

    fn delete_group(&self, id: i64) -> bool {
        let mut tables = self.write();
        if tables.groups.remove(&id).is_none() {
            return false;
        }
        tables.memberships.retain(|(_, group_id)| *group_id != id);
        true
    }

    fn add_member(&self, user_id: i64, group_id: i64) -> bool {
        let mut tables = self.write();
        if !tables.users.contains_key(&user_id) || !tables.groups.contains_key(&group_id) {
            return false;
        }
        tables.memberships.insert((user_id, group_id));
        true
    }

    fn remove_member(&self, user_id: i64, group_id: i64) -> bool {
        self.write().memberships.remove(&(user_id, group_id))
    }

    fn groups_of(&self, user_id: i64) -> Vec<GroupRecord> {
        let tables = self.read();
        tables
            .memberships
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, gid)| tables.groups.get(gid).cloned())
            .collect()
    }

    fn members_of(&self, group_id: i64) -> Vec<UserRecord> {
        let tables = self.read();
        tables
            .memberships
            .iter()
            .filter(|(_, gid)| *gid == group_id)
            .filter_map(|(uid, _)| tables.users.get(uid).cloned())
            .collect()
    }
}
