//! API Module
//!
//! HTTP handlers and routing for the social network REST API.
//!
//! # Endpoints
//! - `/users`, `/users/bulk`, `/users/search`, `/users/by-post-content`
//! - `/users/:id`, `/users/:id/groups[/:group_id]`, `/users/:id/posts`
//! - `/posts/:id`
//! - `/groups`, `/groups/:id`, `/groups/by-name/:name`
//! - `GET /stats` - Response cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
