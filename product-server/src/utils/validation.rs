//! Request validation
//!
//! Routes bind an ordered slice of [`Rule`]s. The [`validate_request`]
//! middleware buffers the body, runs every rule, and either forwards the
//! untouched request or answers 400 with all collected [`FieldError`]s.
//!
//! Rules are lenient about JSON types: a price may arrive as `500` or
//! `"500"`, availability as `true`, `"true"` or `1`.

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, RawPathParams, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use serde_json::value::RawValue;
use shared::error::{AppError, AppResult, FieldError};

/// Request bodies larger than this are refused outright
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub type JsonObject = serde_json::Map<String, Value>;

/// A validation rule; returns one descriptor per failed check
pub type Rule = fn(&RequestInput) -> Vec<FieldError>;

/// Everything a rule may look at
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: JsonObject,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: JsonObject) -> Self {
        Self { params, body }
    }

    /// Raw path segment
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }
}

/// Run every rule in order and concatenate their descriptors
pub fn run_rules(rules: &[Rule], input: &RequestInput) -> Vec<FieldError> {
    rules.iter().flat_map(|rule| rule(input)).collect()
}

/// Fail with a validation error if any rule fails
pub fn check(rules: &[Rule], input: &RequestInput) -> AppResult<()> {
    let errors = run_rules(rules, input);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_errors(errors))
    }
}

/// Parse a request body into a JSON object; an empty body reads as `{}`
///
/// A top-level number literal that `f64` cannot hold (`1e400`) is kept as its
/// raw text so the field rules report it.
pub fn parse_object(bytes: &[u8]) -> AppResult<JsonObject> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }
    let fields: HashMap<String, Box<RawValue>> =
        serde_json::from_slice(bytes).map_err(|_| not_an_object())?;

    fields
        .into_iter()
        .map(|(key, raw)| {
            let value = match serde_json::from_str::<Value>(raw.get()) {
                Ok(value) => value,
                Err(_) if is_number_literal(raw.get()) => Value::String(raw.get().to_string()),
                Err(_) => return Err(not_an_object()),
            };
            Ok((key, value))
        })
        .collect()
}

fn not_an_object() -> AppError {
    AppError::invalid_request("request body must be a JSON object")
}

fn is_number_literal(raw: &str) -> bool {
    raw.starts_with(|c: char| c == '-' || c.is_ascii_digit())
}

// ── Lenient value readers ───────────────────────────────────────────

/// Absent, null, or a string with nothing but whitespace
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// A finite number, either a JSON number or a numeric string
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Text form of a scalar; objects and arrays have none
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ── Middleware ──────────────────────────────────────────────────────

/// Validation gate
///
/// Attach per method handler with
/// `handler.layer(middleware::from_fn_with_state(RULES, validate_request))`
/// so the path parameters are already matched.
pub async fn validate_request(
    State(rules): State<&'static [Rule]>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let params = match RawPathParams::from_request_parts(&mut parts, &()).await {
        Ok(raw) => raw
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        Err(_) => HashMap::new(),
    };

    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return AppError::invalid_request("request body too large").into_response(),
    };

    let result = parse_object(&bytes)
        .and_then(|body| check(rules, &RequestInput::new(params, body)));

    if let Err(e) = result {
        tracing::debug!(uri = %parts.uri, errors = e.errors.len(), "Request rejected by validation");
        return e.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// JSON object body with the same error envelope as the validation gate
#[derive(Debug, Clone)]
pub struct JsonBody(pub JsonObject);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        parse_object(&bytes).map(JsonBody)
    }
}
