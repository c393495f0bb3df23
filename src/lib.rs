//! In-memory users CRUD service.
//!
//! Exposes a schema-less `users` resource over HTTP together with a health
//! check. Records are arbitrary JSON objects; the service only owns their
//! `id` field.
//!
//! ```text
//! GET    /health      -> 200 {"status":"ok"}
//! POST   /users       -> 201 created record
//! GET    /users       -> 200 [records]
//! PUT    /users/:id   -> 200 updated record | 404 {"error":"User not found"}
//! DELETE /users/:id   -> 200 {"message":"User deleted"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: In-memory user store
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`server`]: Listener binding and graceful serve loop
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError, StoreError};
pub use store::{User, UserStore};
