//! loadwatch daemon library
//!
//! This module provides the core components for the loadwatch daemon:
//! - Admission queue, worker pool and rolling statistics
//! - Sliding-window store backends (Redis, in-memory)
//! - REST API handlers
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod store;

pub use config::DaemonConfig;
pub use error::{AdmissionError, ApiError, DaemonError, ProcessError, StoreError};
pub use pipeline::Pipeline;
pub use server::Server;
pub use store::{InMemoryStore, RedisStore, WindowStore};
