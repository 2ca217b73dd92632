//! Background Tasks Module
//!
//! Contains background tasks that can run periodically during server operation.
//!
//! # Tasks
//! - Expired entry sweep: off by default, enabled with `CLEANUP_INTERVAL`

mod cleanup;

pub use cleanup::spawn_cleanup_task;
