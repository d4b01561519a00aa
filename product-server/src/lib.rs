//! Product REST API server
//!
//! CRUD over a single `products` table in SQLite, with request validation,
//! an OpenAPI document at `/docs` and a health probe.
//!
//! # Module structure
//!
//! - [`core`] - configuration, state, server
//! - [`db`] - connection pool and repository
//! - [`api`] - HTTP routes
//! - [`services`] - router assembly and middleware
//! - [`utils`] - logging and validation

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use services::build_app;
pub use utils::init_logger;
