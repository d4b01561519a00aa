//! OpenAPI document and the interactive reference page

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::core::ServerState;
use shared::error::{ErrorResponse, FieldError, FieldLocation};
use shared::models::{Product, ProductCreate, ProductUpdate};

use super::products::handler;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product REST API",
        description = "API docs for products"
    ),
    paths(
        handler::list,
        handler::get_by_id,
        handler::create,
        handler::update,
        handler::toggle_availability,
        handler::delete,
    ),
    components(schemas(
        Product,
        ProductCreate,
        ProductUpdate,
        ErrorResponse,
        FieldError,
        FieldLocation
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

/// `/docs` (HTML) and `/docs/openapi.json`
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/docs/openapi.json", get(openapi_json))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
