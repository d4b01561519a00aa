//! Product Model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage cap for `name` (the column is `VARCHAR(100)`)
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    /// Assigned by the database, never reused
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor Curvo de 45 pulgadas")]
    pub name: String,
    #[schema(example = 500.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Product {
    /// Replace the writable fields with an update payload
    ///
    /// An absent `availability` keeps the stored value.
    pub fn apply_update(&mut self, data: ProductUpdate) {
        self.name = data.name;
        self.price = data.price;
        if let Some(availability) = data.availability {
            self.availability = availability;
        }
    }

    /// Flip `availability`
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    #[schema(example = "Celular Samsung")]
    pub name: String,
    #[schema(example = 500.0)]
    pub price: f64,
    /// Defaults to `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    #[schema(example = "Celular Samsung")]
    pub name: String,
    #[schema(example = 500.0)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = false)]
    pub availability: Option<bool>,
}
