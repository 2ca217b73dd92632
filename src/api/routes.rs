//! API Routes
//!
//! Configures the Axum router with all social network endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::*;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Users
        .route("/users", post(create_user_handler))
        .route("/users/bulk", post(bulk_create_users_handler))
        .route("/users/search", get(search_users_handler))
        .route("/users/by-post-content", get(users_by_post_content_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/users/:id/groups", get(user_groups_handler))
        .route(
            "/users/:id/groups/:group_id",
            post(join_group_handler).delete(leave_group_handler),
        )
        .route(
            "/users/:id/posts",
            get(user_posts_handler).post(create_post_handler),
        )
        // Posts
        .route(
            "/posts/:id",
            put(update_post_handler).delete(delete_post_handler),
        )
        // Groups
        .route(
            "/groups",
            get(list_groups_handler).post(create_group_handler),
        )
        .route("/groups/by-name/:name", get(group_by_name_handler))
        .route(
            "/groups/:id",
            get(get_group_handler)
                .put(update_group_handler)
                .delete(delete_group_handler),
        )
        // Operations
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
