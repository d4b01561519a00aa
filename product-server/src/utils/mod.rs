//! Utilities

pub mod logger;
pub mod validation;

pub use logger::init_logger;
pub use validation::{JsonBody, JsonObject, RequestInput, Rule, validate_request};
