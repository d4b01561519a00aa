//! Error types and API response structures

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Where a rejected input value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// URL path parameter
    Params,
    /// JSON request body
    Body,
}

/// One failed validation rule
///
/// ```json
/// { "type": "field", "value": -3, "msg": "product price is not valid", "path": "price", "location": "body" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending raw value, omitted when the field was absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    /// Human-readable message
    pub msg: String,
    /// Field name
    pub path: String,
    pub location: FieldLocation,
}

impl FieldError {
    pub fn new(
        location: FieldLocation,
        path: impl Into<String>,
        value: Option<&Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field".to_string(),
            value: value.cloned(),
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }

    /// Descriptor for a body field
    pub fn body(path: impl Into<String>, value: Option<&Value>, msg: impl Into<String>) -> Self {
        Self::new(FieldLocation::Body, path, value, msg)
    }

    /// Descriptor for a path parameter
    pub fn param(path: impl Into<String>, value: Option<&Value>, msg: impl Into<String>) -> Self {
        Self::new(FieldLocation::Params, path, value, msg)
    }
}

/// Application error with structured error code and field-level errors
///
/// This is the error type every handler returns:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable message
/// - Field descriptors for validation failures
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Failed validation rules (empty unless `code` is `ValidationFailed`)
    pub errors: Vec<FieldError>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: Vec::new(),
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error carrying every failed rule
    pub fn validation_errors(errors: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: ErrorCode::ValidationFailed.message().to_string(),
            errors,
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Create a product not found error
    pub fn product_not_found() -> Self {
        Self::new(ErrorCode::ProductNotFound)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TimeoutError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Failure envelope
///
/// ```json
/// { "code": 6001, "error": "product not found" }
/// { "code": 2, "error": "Validation failed", "errors": [ ... ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric [`ErrorCode`]
    pub code: u16,
    /// Client-facing message
    pub error: String,
    /// One entry per failed validation rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        // System errors never leak their detail to clients
        let error = match err.code.category() {
            ErrorCategory::System => err.code.message().to_string(),
            _ => err.message.clone(),
        };
        Self {
            code: err.code.code(),
            error,
            errors: err.errors.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorResponse::from(&self);

        // Log system errors
        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::ProductNotFound);
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.message, "product not found");
        assert!(err.errors.is_empty());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::InvalidRequest, "bad body");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "bad body");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::product_not_found().http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation_errors(vec![]).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::database("disk I/O error").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::permission_denied("origin not allowed").http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::not_found("Route");
        assert_eq!(format!("{}", err), "Route not found");
    }

    #[test]
    fn test_error_response_hides_system_detail() {
        let err = AppError::database("no such table: products");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, 9002);
        assert_eq!(body.error, "internal server error");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AppError::validation_errors(vec![FieldError::param(
            "id",
            Some(&json!("abc")),
            "id is not valid",
        )]);
        let value = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(
            value,
            json!({
                "code": 2,
                "error": "Validation failed",
                "errors": [{
                    "type": "field",
                    "value": "abc",
                    "msg": "id is not valid",
                    "path": "id",
                    "location": "params"
                }]
            })
        );

        let value = serde_json::to_value(ErrorResponse::from(&AppError::product_not_found())).unwrap();
        assert_eq!(value, json!({ "code": 6001, "error": "product not found" }));
    }

    #[test]
    fn test_field_error_omits_missing_value() {
        let value = serde_json::to_value(FieldError::body(
            "name",
            None,
            "product name cannot be empty",
        ))
        .unwrap();
        assert!(value.get("value").is_none());
        assert_eq!(value["location"], "body");
    }

    #[test]
    fn test_api_response_envelope() {
        let value = serde_json::to_value(ApiResponse::new("Producto eliminado")).unwrap();
        assert_eq!(value, json!({ "data": "Producto eliminado" }));
    }
}
