//! Repository Module
//!
//! The backing data source queried on a cache miss and mutated by the
//! service layer. Only the interface matters to the cache; the bundled
//! implementation keeps everything in memory.

#[cfg(test)]
pub(crate) mod hooked;
mod memory;

pub use memory::InMemoryRepository;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
}

/// A stored post, owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
}

/// A stored group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
}

/// Outcome of renaming a user or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rename {
    Renamed,
    /// No row with that id
    Missing,
    /// Another row already holds the name
    NameTaken,
}

// == Repository Trait ==
/// Relational store of users, posts, groups and group membership.
///
/// Lookups return `None`/`false` for missing rows; deciding what that
/// means is left to the caller. Usernames and group names are unique:
/// the uniqueness check and the write happen atomically inside the
/// repository, so creation returns `None` when the name is taken.
pub trait Repository: Send + Sync {
    // Users
    fn create_user(&self, username: &str) -> Option<UserRecord>;
    fn find_user(&self, id: i64) -> Option<UserRecord>;
    fn find_user_by_username(&self, username: &str) -> Option<UserRecord>;
    /// Case-insensitive substring match on usernames.
    fn search_users(&self, fragment: &str) -> Vec<UserRecord>;
    /// Distinct authors of posts whose content contains `fragment`.
    fn users_by_post_content(&self, fragment: &str) -> Vec<UserRecord>;
    fn rename_user(&self, id: i64, username: &str) -> Rename;
    /// Deletes the user with their posts and memberships.
    fn delete_user(&self, id: i64) -> bool;

    // Posts
    fn create_post(&self, user_id: i64, content: &str) -> Option<PostRecord>;
    fn find_post(&self, id: i64) -> Option<PostRecord>;
    fn posts_by_user(&self, user_id: i64) -> Vec<PostRecord>;
    fn update_post(&self, id: i64, content: &str) -> bool;
    fn delete_post(&self, id: i64) -> bool;

    // Groups
    fn create_group(&self, name: &str) -> Option<GroupRecord>;
    fn find_group(&self, id: i64) -> Option<GroupRecord>;
    fn find_group_by_name(&self, name: &str) -> Option<GroupRecord>;
    fn all_groups(&self) -> Vec<GroupRecord>;
    fn rename_group(&self, id: i64, name: &str) -> Rename;
    /// Deletes the group and every membership in it.
    fn delete_group(&self, id: i64) -> bool;

    // Membership
    /// False when the user or the group does not exist.
    fn add_member(&self, user_id: i64, group_id: i64) -> bool;
    /// False when the user was not a member of the group.
    fn remove_member(&self, user_id: i64, group_id: i64) -> bool;
    fn groups_of(&self, user_id: i64) -> Vec<GroupRecord>;
    fn members_of(&self, group_id: i64) -> Vec<UserRecord>;
}
