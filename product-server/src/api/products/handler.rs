//! Product API Handlers
//!
//! Validation has already run by the time these execute; see [`super::rules`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorResponse};
use shared::models::Product;

use super::rules;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::JsonBody;

/// Body returned by a successful delete
pub const DELETED_MESSAGE: &str = "Producto eliminado";

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products - list every product
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products ordered by id", body = ApiResponse<Vec<Product>>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.db.pool.clone());
    let products = repo.find_all().await?;
    Ok(Json(ApiResponse::new(products)))
}

/// GET /api/products/{id} - fetch one product
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = rules::parse_id(&id)?;
    let repo = ProductRepository::new(state.db.pool.clone());
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    Ok(Json(ApiResponse::new(product)))
}

/// POST /api/products - create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = shared::models::ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let payload = rules::create_payload(&body)?;
    let repo = ProductRepository::new(state.db.pool.clone());
    let product = repo.create(payload).await?;

    tracing::info!(id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(ApiResponse::new(product))))
}

/// PUT /api/products/{id} - replace name, price and availability
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = shared::models::ProductUpdate,
    responses(
        (status = 200, description = "The updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id or input data", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = rules::parse_id(&id)?;
    let payload = rules::update_payload(&body)?;
    let repo = ProductRepository::new(state.db.pool.clone());

    let mut product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    product.apply_update(payload);
    let product = repo.save(&product).await?;

    tracing::info!(id, "Product updated");
    Ok(Json(ApiResponse::new(product)))
}

/// PATCH /api/products/{id} - flip availability
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product with availability inverted", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn toggle_availability(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = rules::parse_id(&id)?;
    let repo = ProductRepository::new(state.db.pool.clone());

    let mut product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    product.toggle_availability();
    let product = repo.save(&product).await?;

    tracing::info!(id, availability = product.availability, "Product availability changed");
    Ok(Json(ApiResponse::new(product)))
}

/// DELETE /api/products/{id} - remove a product permanently
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<String>, example = json!({ "data": "Producto eliminado" })),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    let id = rules::parse_id(&id)?;
    let repo = ProductRepository::new(state.db.pool.clone());

    repo.find_by_id(id)
        .await?
        .ok_or_else(AppError::product_not_found)?;

    // Another request may have removed it since the fetch
    if !repo.delete(id).await? {
        return Err(AppError::product_not_found());
    }

    tracing::info!(id, "Product deleted");
    Ok(Json(ApiResponse::new(DELETED_MESSAGE)))
}
