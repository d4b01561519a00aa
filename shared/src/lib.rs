//! Shared types for the product API
//!
//! Error types, response envelopes and the product record, used by the
//! server and by anything that talks to it.

pub mod error;
pub mod models;
pub mod util;
