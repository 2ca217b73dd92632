//! API Handlers
//!
//! HTTP request handlers for each social network endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ContentQuery, GroupRequest, GroupView, GroupWithUsersView, HealthResponse, MessageResponse,
    PostRequest, PostView, StatsResponse, UserRequest, UserView, UsernameQuery,
};
use crate::repository::{InMemoryRepository, Repository};
use crate::services::{GroupService, PostService, UserService, ViewCache};

/// Application state shared across all handlers.
///
/// Every service holds a clone of the same cache handle.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: ViewCache,
    pub users: Arc<UserService>,
    pub posts: Arc<PostService>,
    pub groups: Arc<GroupService>,
}

impl AppState {
    /// Wires the services around one repository and one cache.
    pub fn new(repo: Arc<dyn Repository>, cache: ViewCache) -> Self {
        Self {
            users: Arc::new(UserService::new(repo.clone(), cache.clone())),
            posts: Arc::new(PostService::new(repo.clone(), cache.clone())),
            groups: Arc::new(GroupService::new(repo, cache.clone())),
            cache,
        }
    }

    /// Creates a new AppState from configuration with an in-memory repository.
    pub fn from_config(config: &Config) -> Self {
        let cache = SharedCache::with_capacity(config.max_entries, config.ttl());
        Self::new(Arc::new(InMemoryRepository::new()), cache)
    }
}

// == Users ==

/// Handler for POST /users
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserView>)> {
    let user = state.users.register(&req.username)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST /users/bulk
pub async fn bulk_create_users_handler(
    State(state): State<AppState>,
    Json(reqs): Json<Vec<UserRequest>>,
) -> Result<(StatusCode, Json<Vec<UserView>>)> {
    let usernames: Vec<String> = reqs.into_iter().map(|r| r.username).collect();
    let users = state.users.bulk_register(&usernames)?;
    Ok((StatusCode::CREATED, Json(users)))
}

/// Handler for GET /users/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>> {
    Ok(Json(state.users.get_one(id)?))
}

/// Handler for PUT /users/:id
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserView>> {
    Ok(Json(state.users.update(id, &req.username)?))
}

/// Handler for DELETE /users/:id
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let id = state.users.delete(id)?;
    Ok(Json(MessageResponse::new("User deleted successfully", id)))
}

/// Handler for GET /users/search?username=
pub async fn search_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<Vec<UserView>> {
    Json(state.users.search_by_username(&query.username))
}

/// Handler for GET /users/by-post-content?content=
pub async fn users_by_post_content_handler(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<UserView>>> {
    Ok(Json(state.users.find_by_post_content(&query.content)?))
}

/// Handler for GET /users/:id/groups
pub async fn user_groups_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<GroupView>>> {
    Ok(Json(state.users.groups_of(id)?))
}

/// Handler for POST /users/:id/groups/:group_id
pub async fn join_group_handler(
    State(state): State<AppState>,
    Path((user_id, group_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>> {
    state.users.add_to_group(user_id, group_id)?;
    Ok(Json(MessageResponse::new("User added to group", group_id)))
}

/// Handler for DELETE /users/:id/groups/:group_id
pub async fn leave_group_handler(
    State(state): State<AppState>,
    Path((user_id, group_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>> {
    state.users.remove_from_group(user_id, group_id)?;
    Ok(Json(MessageResponse::new("User removed from group", group_id)))
}

// == Posts ==

/// Handler for GET /users/:id/posts
pub async fn user_posts_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PostView>>> {
    Ok(Json(state.posts.user_posts(user_id)?))
}

/// Handler for POST /users/:id/posts
pub async fn create_post_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostView>)> {
    let post = state.posts.create(user_id, &req.content)?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Handler for PUT /posts/:id
pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> Result<Json<PostView>> {
    Ok(Json(state.posts.update(post_id, &req.content)?))
}

/// Handler for DELETE /posts/:id
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let id = state.posts.delete(post_id)?;
    Ok(Json(MessageResponse::new("Post deleted successfully", id)))
}

// == Groups ==

/// Handler for GET /groups
pub async fn list_groups_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupWithUsersView>>> {
    Ok(Json(state.groups.all()?))
}

/// Handler for POST /groups
pub async fn create_group_handler(
    State(state): State<AppState>,
    Json(req): Json<GroupRequest>,
) -> Result<(StatusCode, Json<GroupView>)> {
    let group = state.groups.register(&req.name)?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// Handler for GET /groups/:id
pub async fn get_group_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GroupWithUsersView>> {
    Ok(Json(state.groups.get_one(id)?))
}

/// Handler for GET /groups/by-name/:name
pub async fn group_by_name_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<GroupWithUsersView>> {
    Ok(Json(state.groups.find_by_name(&name)?))
}

/// Handler for PUT /groups/:id
pub async fn update_group_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<GroupRequest>,
) -> Result<Json<GroupWithUsersView>> {
    Ok(Json(state.groups.update(id, &req.name)?))
}

/// Handler for DELETE /groups/:id
pub async fn delete_group_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let id = state.groups.delete(id)?;
    Ok(Json(MessageResponse::new("Group deleted successfully", id)))
}

// == Operations ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
