//! Product validation rules and payload extraction

use serde_json::Value;
use shared::error::{AppError, AppResult, FieldError};
use shared::models::{MAX_PRODUCT_NAME_LEN, ProductCreate, ProductUpdate};

use crate::utils::validation::{
    JsonObject, RequestInput, Rule, as_boolean, as_number, as_text, is_blank,
};

pub const MSG_INVALID_ID: &str = "id is not valid";
pub const MSG_NAME_EMPTY: &str = "product name cannot be empty";
pub const MSG_NAME_TOO_LONG: &str = "product name is too long";
pub const MSG_NAME_NOT_TEXT: &str = "product name must be text";
pub const MSG_PRICE_EMPTY: &str = "product price cannot be empty";
pub const MSG_PRICE_NOT_NUMBER: &str = "product price must be a number";
pub const MSG_PRICE_INVALID: &str = "product price is not valid";
pub const MSG_AVAILABILITY_INVALID: &str = "availability value not valid";

/// Routes addressing a single product
pub const ID: &[Rule] = &[id_is_int];

/// POST /api/products
pub const CREATE: &[Rule] = &[
    name_not_empty,
    name_is_text,
    name_within_cap,
    price_not_empty,
    price_is_numeric,
    price_is_positive,
    availability_is_boolean,
];

/// PUT /api/products/{id}
pub const UPDATE: &[Rule] = &[
    id_is_int,
    name_not_empty,
    name_is_text,
    name_within_cap,
    price_not_empty,
    price_is_numeric,
    price_is_positive,
    availability_is_boolean,
];

// ── Rules ───────────────────────────────────────────────────────────

fn id_is_int(input: &RequestInput) -> Vec<FieldError> {
    let raw = input.param("id");
    match raw {
        Some(id) if id.parse::<i64>().is_ok() => vec![],
        _ => vec![FieldError::param(
            "id",
            raw.map(|s| Value::String(s.to_string())).as_ref(),
            MSG_INVALID_ID,
        )],
    }
}

fn name_not_empty(input: &RequestInput) -> Vec<FieldError> {
    let value = input.field("name");
    if is_blank(value) {
        vec![FieldError::body("name", value, MSG_NAME_EMPTY)]
    } else {
        vec![]
    }
}

/// Objects and arrays have no text form
fn name_is_text(input: &RequestInput) -> Vec<FieldError> {
    match input.field("name") {
        Some(value) if !is_blank(Some(value)) && as_text(value).is_none() => {
            vec![FieldError::body("name", Some(value), MSG_NAME_NOT_TEXT)]
        }
        _ => vec![],
    }
}

fn name_within_cap(input: &RequestInput) -> Vec<FieldError> {
    let value = input.field("name");
    match value.and_then(as_text) {
        Some(name) if name.chars().count() > MAX_PRODUCT_NAME_LEN => {
            vec![FieldError::body("name", value, MSG_NAME_TOO_LONG)]
        }
        _ => vec![],
    }
}

fn price_not_empty(input: &RequestInput) -> Vec<FieldError> {
    let value = input.field("price");
    if is_blank(value) {
        vec![FieldError::body("price", value, MSG_PRICE_EMPTY)]
    } else {
        vec![]
    }
}

fn price_is_numeric(input: &RequestInput) -> Vec<FieldError> {
    let value = input.field("price");
    match value.and_then(as_number) {
        Some(_) => vec![],
        None => vec![FieldError::body("price", value, MSG_PRICE_NOT_NUMBER)],
    }
}

fn price_is_positive(input: &RequestInput) -> Vec<FieldError> {
    let value = input.field("price");
    match value.and_then(as_number) {
        Some(price) if price > 0.0 => vec![],
        _ => vec![FieldError::body("price", value, MSG_PRICE_INVALID)],
    }
}

/// Optional field: only checked when present
fn availability_is_boolean(input: &RequestInput) -> Vec<FieldError> {
    match input.field("availability") {
        Some(value) if as_boolean(value).is_none() => {
            vec![FieldError::body("availability", Some(value), MSG_AVAILABILITY_INVALID)]
        }
        _ => vec![],
    }
}

// ── Payloads ────────────────────────────────────────────────────────

/// Parse the `id` path segment
pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| {
        AppError::validation_errors(vec![FieldError::param(
            "id",
            Some(&Value::String(raw.to_string())),
            MSG_INVALID_ID,
        )])
    })
}

/// Typed create payload from a body that already passed [`CREATE`]
///
/// The rules are re-checked so the function is safe to call on its own.
pub fn create_payload(body: &JsonObject) -> AppResult<ProductCreate> {
    let (name, price, availability) = extract(body)?;
    Ok(ProductCreate {
        name,
        price,
        availability,
    })
}

/// Typed update payload from a body that already passed [`UPDATE`]
pub fn update_payload(body: &JsonObject) -> AppResult<ProductUpdate> {
    let (name, price, availability) = extract(body)?;
    Ok(ProductUpdate {
        name,
        price,
        availability,
    })
}

fn extract(body: &JsonObject) -> AppResult<(String, f64, Option<bool>)> {
    let input = RequestInput {
        body: body.clone(),
        ..Default::default()
    };
    crate::utils::validation::check(CREATE, &input)?;

    let name = body.get("name").and_then(as_text).ok_or_else(|| {
        AppError::validation_errors(vec![FieldError::body(
            "name",
            body.get("name"),
            MSG_NAME_NOT_TEXT,
        )])
    })?;
    let price = body.get("price").and_then(as_number).ok_or_else(|| {
        AppError::validation_errors(vec![FieldError::body(
            "price",
            body.get("price"),
            MSG_PRICE_NOT_NUMBER,
        )])
    })?;
    let availability = body.get("availability").and_then(as_boolean);

    Ok((name, price, availability))
}
