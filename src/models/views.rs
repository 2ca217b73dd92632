//! View models returned by services and stored in the response cache.

use serde::Serialize;

use crate::repository::{GroupRecord, PostRecord, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: i64,
    pub content: String,
}

impl From<PostRecord> for PostView {
    fn from(post: PostRecord) -> Self {
        Self {
            id: post.id,
            content: post.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub id: i64,
    pub name: String,
}

impl From<GroupRecord> for GroupView {
    fn from(group: GroupRecord) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

/// A user together with their posts and groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub posts: Vec<PostView>,
    pub groups: Vec<GroupView>,
}

/// A group member as listed inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub id: i64,
    pub username: String,
}

impl From<UserRecord> for MemberView {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// A group together with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupWithUsersView {
    pub id: i64,
    pub name: String,
    pub users: Vec<MemberView>,
}

// == Cached View ==
/// Every value shape the response cache holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedView {
    User(UserView),
    Users(Vec<UserView>),
    Posts(Vec<PostView>),
    Group(GroupWithUsersView),
    Groups(Vec<GroupWithUsersView>),
}

/// Conversion between a concrete view and its cached form.
///
/// `from_cached` returns `None` when the cached value has another shape,
/// which only happens if two call sites disagree about a key.
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedView;
    fn from_cached(cached: CachedView) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedView {
                CachedView::$variant(self)
            }

            fn from_cached(cached: CachedView) -> Option<Self> {
                match cached {
                    CachedView::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(UserView, User);
cacheable!(Vec<UserView>, Users);
cacheable!(Vec<PostView>, Posts);
cacheable!(GroupWithUsersView, Group);
cacheable!(Vec<GroupWithUsersView>, Groups);
