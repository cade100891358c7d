//! Minimal HTTP service used to exercise a CI/CD pipeline.
//!
//! Two routes, both `GET` and both answering JSON:
//!
//! ```text
//! GET /        {"message": "Hello from CI/CD Pipeline!", "timestamp": "...", "environment": "development"}
//! GET /health  {"status": "OK", "uptime": 12.345, "timestamp": "..."}
//! ```
//!
//! Building the router ([`api::create_router`], [`server::Server::new`]) is
//! free of side effects. Only [`server::Server::bind`], called by the binary,
//! opens a socket.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Handlers and router
//! - [`server`]: Bind and serve lifecycle
//! - [`metrics`]: Request counters and latency
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use server::{BoundServer, Server};
