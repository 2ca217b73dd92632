//! Request, response and view models for the social network API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! bodies and the views held in the response cache.

pub mod requests;
pub mod responses;
pub mod views;

// Re-export commonly used types
pub use requests::{ContentQuery, GroupRequest, PostRequest, UserRequest, UsernameQuery};
pub use responses::{HealthResponse, MessageResponse, StatsResponse};
pub use views::{
    CachedView, Cacheable, GroupView, GroupWithUsersView, MemberView, PostView, UserView,
};
