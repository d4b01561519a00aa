//! API routes
//!
//! - [`products`] - product CRUD under `/api/products`
//! - [`health`] - liveness probe
//! - [`docs`] - OpenAPI document and reference page

pub mod docs;
pub mod health;
pub mod products;
