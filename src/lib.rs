//! Social Cache - A social network backend with a bounded response cache
//!
//! Services read users, posts and groups through an in-process cache with
//! a fixed TTL, insertion-order capacity eviction and prefix invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
