//! Product API module
//!
//! | Method | Path | Rules |
//! |--------|------|-------|
//! | GET | /api/products | - |
//! | POST | /api/products | [`rules::CREATE`] |
//! | GET | /api/products/{id} | [`rules::ID`] |
//! | PUT | /api/products/{id} | [`rules::UPDATE`] |
//! | PATCH | /api/products/{id} | [`rules::ID`] |
//! | DELETE | /api/products/{id} | [`rules::ID`] |

pub(crate) mod handler;
pub mod rules;

use axum::{Router, handler::Handler, middleware, routing::get};

use crate::core::ServerState;
use crate::utils::validate_request;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list).post(
                handler::create
                    .layer(middleware::from_fn_with_state(rules::CREATE, validate_request)),
            ),
        )
        .route(
            "/{id}",
            get(
                handler::get_by_id
                    .layer(middleware::from_fn_with_state(rules::ID, validate_request)),
            )
            .put(
                handler::update
                    .layer(middleware::from_fn_with_state(rules::UPDATE, validate_request)),
            )
            .patch(
                handler::toggle_availability
                    .layer(middleware::from_fn_with_state(rules::ID, validate_request)),
            )
            .delete(
                handler::delete
                    .layer(middleware::from_fn_with_state(rules::ID, validate_request)),
            ),
        )
}
