use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, Response, StatusCode, header},
    middleware,
};
use shared::error::AppError;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::core::{Config, ServerState};

/// HTTP access log middleware
async fn log_request(request: Request<Body>, next: middleware::Next) -> Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis();

    tracing::info!(target: "http_access", "{} {} {} {}ms", method, uri, status, latency_ms);

    response
}

/// Refuse browser requests from origins outside the allow-list
///
/// Requests without an `Origin` header (curl, server-to-server) pass.
async fn reject_foreign_origin(
    State(config): State<Arc<Config>>,
    request: Request<Body>,
    next: middleware::Next,
) -> Response<Body> {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|origin| config.is_origin_allowed(origin))
            .unwrap_or(false);
        if !allowed {
            tracing::warn!(origin = ?origin, "Rejected request from foreign origin");
            return axum::response::IntoResponse::into_response(AppError::permission_denied(
                "origin not allowed",
            ));
        }
    }
    next.run(request).await
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::products::router())
        .merge(crate::api::docs::router())
        .merge(crate::api::health::router())
        .fallback(route_not_found)
}

/// Build the complete application with state and middleware
pub fn build_app(state: ServerState) -> Router {
    let config = state.config.clone();
    let request_timeout = Duration::from_millis(config.request_timeout_ms);

    build_router()
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            config.clone(),
            reject_foreign_origin,
        ))
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(log_request))
}
