#[path = "../common/fixtures.rs"]
mod fixtures;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use entity_desc::routes::{RouteRegistrar, RouteSpec};
use entity_desc::web::{app, router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use fixtures::{broken, reader, shop, user};

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, content_type, body)
}

#[tokio::test]
async fn test_describe_existing_table() {
    let app = app(reader(shop()), &mut RouteRegistrar::new(), false);

    let (status, content_type, body) = get(app, "/entity/desc/user_table").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        json!({
            "table": "user_table",
            "columns": [
                {"field": "id", "type": "integer", "length": null, "nullable": false},
                {"field": "name", "type": "string", "length": 255, "nullable": false},
                {"field": "created_at", "type": "datetime", "length": null, "nullable": true}
            ]
        })
    );
}

#[tokio::test]
async fn test_describe_unknown_table() {
    let app = app(reader(shop()), &mut RouteRegistrar::new(), false);

    let (status, content_type, body) = get(app, "/entity/desc/nonexistent_table").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, json!({"error": "Table not found"}));
}

#[tokio::test]
async fn test_describe_broken_table_is_not_found() {
    let app = app(
        reader(vec![user(), broken("broken_table")]),
        &mut RouteRegistrar::new(),
        false,
    );

    let (status, _, body) = get(app.clone(), "/entity/desc/broken_table").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Table not found"}));

    let (status, _, _) = get(app, "/entity/desc/user_table").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dynamic_route_serves_fixed_table() {
    let state = Arc::new(AppState {
        reader: reader(shop()),
    });
    let spec = RouteSpec {
        name: "entity_desc_user_table".to_string(),
        path: "/docs/users".to_string(),
        table_name: "user_table".to_string(),
    };
    let app = router(state, &[spec]);

    let (status, _, body) = get(app, "/docs/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["table"], "user_table");
    assert_eq!(body["columns"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_dynamic_routes_mounted() {
    let mut registrar = RouteRegistrar::new();
    let app = app(reader(shop()), &mut registrar, true);

    assert!(registrar.is_initialized());

    let (status, _, body) = get(app, "/entity/desc/order_item").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["table"], "order_item");
}

#[tokio::test]
async fn test_second_composition_registers_nothing() {
    let mut registrar = RouteRegistrar::new();
    let _first = app(reader(shop()), &mut registrar, true);

    // Building again with the same registrar must not mount the routes a
    // second time; the generic route still answers.
    let second = app(reader(shop()), &mut registrar, true);

    let (status, _, _) = get(second, "/entity/desc/user_table").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dynamic_routes_disabled_leaves_registrar_untouched() {
    let mut registrar = RouteRegistrar::new();
    let _app = app(reader(shop()), &mut registrar, false);

    assert!(!registrar.is_initialized());
}
