//! Unified error system for the product API
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with code, message and field-level errors
//! - [`ApiResponse`] / [`ErrorResponse`]: JSON envelopes
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 6xxx: Product errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, FieldError};
//!
//! let err = AppError::product_not_found();
//! assert_eq!(err.code, ErrorCode::ProductNotFound);
//!
//! let err = AppError::validation_errors(vec![
//!     FieldError::body("price", None, "product price cannot be empty"),
//! ]);
//! assert_eq!(err.errors.len(), 1);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ErrorResponse, FieldError, FieldLocation};
