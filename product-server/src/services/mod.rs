//! Services
//!
//! - [`http`] - router assembly and HTTP middleware

pub mod http;

pub use http::{build_app, build_router};
