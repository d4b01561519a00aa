use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use product_server::{Config, DbService, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

const FRONTEND: &str = "http://localhost:5173";

async fn app() -> Router {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "FRONTEND_URL" => Some(FRONTEND.to_string()),
        _ => None,
    });
    let state = ServerState::initialize(&config).await.unwrap();
    build_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, "/api/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value["data"].clone()
}

fn messages(value: &Value) -> Vec<String> {
    value["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["msg"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_monitor_lifecycle() {
    let app = app().await;

    let product = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    assert_eq!(product["name"], "Monitor");
    assert_eq!(product["price"], 500.0);
    assert_eq!(product["availability"], true);
    let id = product["id"].as_i64().unwrap();
    let uri = format!("/api/products/{id}");

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "Producto eliminado" }));

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "code": 6001, "error": "product not found" }));
}

#[tokio::test]
async fn test_list_in_id_order() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));

    create(&app, json!({ "name": "Teclado", "price": 25 })).await;
    create(&app, json!({ "name": "Mouse", "price": "12.5", "availability": false })).await;

    let (_, body) = send(&app, Method::GET, "/api/products", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Teclado", "Mouse"]);
    assert_eq!(body["data"][1]["price"], 12.5);
    assert_eq!(body["data"][1]["availability"], false);
}

#[tokio::test]
async fn test_invalid_id_rejected_everywhere() {
    let app = app().await;
    let valid = json!({ "name": "Monitor", "price": 10 });

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(valid.clone())),
        (Method::PATCH, None),
        (Method::DELETE, None),
    ] {
        let (status, value) = send(&app, method.clone(), "/api/products/abc", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(value["code"], 2);
        assert_eq!(value["errors"][0]["msg"], "id is not valid");
        assert_eq!(value["errors"][0]["location"], "params");
        assert_eq!(value["errors"][0]["value"], "abc");
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app().await;
    let valid = json!({ "name": "Monitor", "price": 10 });

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(valid.clone())),
        (Method::PATCH, None),
        (Method::DELETE, None),
    ] {
        let (status, value) = send(&app, method.clone(), "/api/products/9999", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(value["error"], "product not found");
    }
}

#[tokio::test]
async fn test_create_validation() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/api/products", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "product name cannot be empty",
            "product price cannot be empty",
            "product price must be a number",
            "product price is not valid",
        ]
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "Monitor", "price": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec!["product price must be a number", "product price is not valid"]
    );

    for price in [json!(0), json!(-5)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Monitor", "price": price.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["product price is not valid"]);
        assert_eq!(body["errors"][0]["value"], price);
    }

    // Nothing persisted by any rejected request
    let (_, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_non_text_name_reported_per_field() {
    let app = app().await;

    for name in [json!({ "a": 1 }), json!(["x"])] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(json!({ "name": name.clone(), "price": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 2);
        assert_eq!(messages(&body), vec!["product name must be text"]);
        assert_eq!(body["errors"][0]["path"], "name");
        assert_eq!(body["errors"][0]["value"], name);
    }

    let (_, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_out_of_range_price_is_a_field_error() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Monitor","price":1e400}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 2);
    assert_eq!(
        messages(&body),
        vec!["product price must be a number", "product price is not valid"]
    );
    assert_eq!(body["errors"][0]["value"], "1e400");
}

#[tokio::test]
async fn test_database_failure_is_opaque_500() {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    });
    let state = ServerState::initialize(&config).await.unwrap();
    let pool = state.db.pool.clone();
    let app = build_app(state);

    let product = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    let uri = format!("/api/products/{}", product["id"]);

    sqlx::query("DROP TABLE products")
        .execute(&pool)
        .await
        .unwrap();

    for (method, uri, body) in [
        (Method::GET, "/api/products".to_string(), None),
        (
            Method::POST,
            "/api/products".to_string(),
            Some(json!({ "name": "Teclado", "price": 25 })),
        ),
        (Method::PATCH, uri.clone(), None),
        (Method::GET, uri.clone(), None),
    ] {
        let (status, value) = send(&app, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(
            value,
            json!({ "code": 9002, "error": "internal server error" })
        );
        assert!(!value.to_string().contains("no such table"));
    }
}

#[tokio::test]
async fn test_empty_and_malformed_bodies() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/api/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body).len(), 4);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 5);
    assert_eq!(body["error"], "request body must be a JSON object");
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app().await;
    let product = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    let uri = format!("/api/products/{}", product["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Monitor Curvo", "price": 650, "availability": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], product["id"]);
    assert_eq!(body["data"]["name"], "Monitor Curvo");
    assert_eq!(body["data"]["price"], 650.0);
    assert_eq!(body["data"]["availability"], false);

    // Absent availability keeps the stored value
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Monitor Plano", "price": 400 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "", "price": 400, "availability": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec!["product name cannot be empty", "availability value not valid"]
    );

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["name"], "Monitor Plano");
}

#[tokio::test]
async fn test_patch_twice_restores_availability() {
    let app = app().await;
    let product = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    let uri = format!("/api/products/{}", product["id"]);

    send(&app, Method::PATCH, &uri, None).await;
    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn test_delete_twice_and_ids_not_reused() {
    let app = app().await;
    let first = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    let uri = format!("/api/products/{}", first["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let second = create(&app, json!({ "name": "Monitor", "price": 500 })).await;
    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_origin_allow_list() {
    let app = app().await;

    let request = Request::builder()
        .uri("/api/products")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "code": 2001, "error": "origin not allowed" }));

    let request = Request::builder()
        .uri("/api/products")
        .header(header::ORIGIN, FRONTEND)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        FRONTEND
    );
}

#[tokio::test]
async fn test_health_docs_and_fallback() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/products/{id}"].is_object());

    let request = Request::builder().uri("/docs").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_reset_leaves_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("products.db").display());
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        _ => None,
    });

    let state = ServerState::initialize(&config).await.unwrap();
    let db: DbService = state.db.clone();
    let app = build_app(state);
    create(&app, json!({ "name": "Monitor", "price": 500 })).await;

    db.reset().await.unwrap();

    let (_, body) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(body["data"], json!([]));
}
