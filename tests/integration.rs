use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cylinder_dispatch::api::rest::router;
use cylinder_dispatch::config::Config;
use cylinder_dispatch::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

const OPERATOR_TOKEN: &str = "ops-secret";

fn setup() -> axum::Router {
    let config = Config {
        operator_token: Some(OPERATOR_TOKEN.to_string()),
        ..Config::default()
    };
    router(Arc::new(AppState::new(&config)))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

async fn enroll_customer(app: &axum::Router) -> (String, String) {
    let (status, body) = send(app, json_request("POST", "/customers", None, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    (
        body["customer_id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn register_driver(app: &axum::Router, price_per_kg: f64) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/drivers",
            None,
            json!({ "name": "Farai", "price_per_kg": price_per_kg }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        body["driver"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn place_order(app: &axum::Router, token: &str, weight_kg: f64, quantity: u32) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/orders",
            Some(token),
            json!({
                "quantity": quantity,
                "weight_kg": weight_kg,
                "delivery_address": "4 Samora Machel Ave",
                "payment_method": "ecocash"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = setup();
    let (status, body) = send(&app, get_request("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["orders"], 0);
    assert_eq!(body["drivers"], 0);
}

#[tokio::test]
async fn metrics_endpoint_exposes_gauges() {
    let app = setup();
    let response = app.oneshot(get_request("/metrics", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("busy_drivers"));
}

#[tokio::test]
async fn requests_without_credentials_are_forbidden() {
    let app = setup();

    let (status, body) = send(&app, get_request("/orders", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = send(&app, get_request("/orders", Some("not-a-token"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_driver_validates_price() {
    let app = setup();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/drivers",
            None,
            json!({ "name": "Farai", "price_per_kg": -1.0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn full_delivery_over_http() {
    let app = setup();
    let (customer_id, customer) = enroll_customer(&app).await;
    let (driver_id, driver) = register_driver(&app, 3.0).await;
    let order_id = place_order(&app, &customer, 5.0, 2).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/orders/{order_id}/assign"),
            Some(&customer),
            json!({ "driver_id": driver_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "assigned");
    assert_eq!(body["total_price"], 30.0);
    assert_eq!(body["customer_id"], customer_id.as_str());

    let (_, drivers) = send(&app, get_request("/drivers", None)).await;
    assert_eq!(drivers[0]["availability"], "busy");

    for (step, expected) in [
        ("confirm", "confirmed"),
        ("pickup", "picked_up"),
        ("deliver", "delivered"),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                &format!("/orders/{order_id}/{step}"),
                Some(&driver),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{step}: {body}");
        assert_eq!(body["status"], expected);
    }

    let (_, order) = send(&app, get_request(&format!("/orders/{order_id}"), Some(&customer))).await;
    assert_eq!(order["status"], "delivered");
    assert!(order["delivered_at"].is_string());

    let (_, drivers) = send(&app, get_request("/drivers", None)).await;
    assert_eq!(drivers[0]["availability"], "available");

    let (_, notifications) = send(&app, get_request("/notifications", Some(&customer))).await;
    assert_eq!(notifications.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn pickup_before_confirmation_is_invalid_transition() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let (driver_id, driver) = register_driver(&app, 2.0).await;
    let order_id = place_order(&app, &customer, 9.0, 1).await;

    send(
        &app,
        json_request(
            "POST",
            &format!("/orders/{order_id}/assign"),
            Some(&customer),
            json!({ "driver_id": driver_id }),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/orders/{order_id}/pickup"), Some(&driver), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "invalid_transition");
}

#[tokio::test]
async fn second_assignment_reports_already_assigned() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let (first, _) = register_driver(&app, 2.0).await;
    let (second, _) = register_driver(&app, 2.0).await;
    let order_id = place_order(&app, &customer, 9.0, 1).await;
    let uri = format!("/orders/{order_id}/assign");

    let (status, _) = send(
        &app,
        json_request("POST", &uri, Some(&customer), json!({ "driver_id": first })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request("POST", &uri, Some(&customer), json!({ "driver_id": second })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "already_assigned");
}

#[tokio::test]
async fn customer_cannot_view_someone_elses_order() {
    let app = setup();
    let (_, alice) = enroll_customer(&app).await;
    let (_, bob) = enroll_customer(&app).await;
    let order_id = place_order(&app, &alice, 9.0, 1).await;

    let (status, body) = send(&app, get_request(&format!("/orders/{order_id}"), Some(&bob))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[tokio::test]
async fn drivers_see_open_orders_and_customer_cancels() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let (_, driver) = register_driver(&app, 2.0).await;
    let order_id = place_order(&app, &customer, 9.0, 1).await;

    let (status, open) = send(&app, get_request("/orders/open", Some(&driver))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(open.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, get_request("/orders/open", Some(&customer))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/orders/{order_id}/cancel"),
            Some(&customer),
            json!({ "reason": "found a closer vendor" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["cancellation_reason"], "found a closer vendor");

    let (_, open) = send(&app, get_request("/orders/open", Some(&driver))).await;
    assert!(open.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_admin_status_is_rejected() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let order_id = place_order(&app, &customer, 9.0, 1).await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}/status"),
            Some(OPERATOR_TOKEN),
            json!({ "status": "teleported" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}/status"),
            Some(OPERATOR_TOKEN),
            json!({ "status": "cancelled" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["cancellation_reason"], "administrative override");
}

#[tokio::test]
async fn status_override_is_closed_to_customers_and_drivers() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let (driver_id, driver) = register_driver(&app, 2.0).await;
    let order_id = place_order(&app, &customer, 9.0, 1).await;
    send(
        &app,
        json_request(
            "POST",
            &format!("/orders/{order_id}/assign"),
            Some(&customer),
            json!({ "driver_id": driver_id }),
        ),
    )
    .await;

    for token in [customer.as_str(), driver.as_str()] {
        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                &format!("/orders/{order_id}/status"),
                Some(token),
                json!({ "status": "cancelled" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");
    }

    let (_, order) = send(&app, get_request(&format!("/orders/{order_id}"), Some(&customer))).await;
    assert_eq!(order["status"], "assigned");
}

#[tokio::test]
async fn malformed_input_is_a_validation_error() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {customer}"))
        .body(Body::from("{\"quantity\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) = send(&app, get_request("/orders/not-a-uuid", Some(&customer))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) = send(
        &app,
        get_request("/notifications?unread=maybe", Some(&customer)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn unpriced_driver_surfaces_pricing_error() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    let (_, body) = send(
        &app,
        json_request("POST", "/drivers", None, json!({ "name": "Rudo" })),
    )
    .await;
    let driver_id = body["driver"]["id"].as_str().unwrap().to_string();
    let order_id = place_order(&app, &customer, 9.0, 1).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/orders/{order_id}/assign"),
            Some(&customer),
            json!({ "driver_id": driver_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "pricing_error");
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = setup();
    let (_, customer) = enroll_customer(&app).await;
    place_order(&app, &customer, 9.0, 1).await;
    place_order(&app, &customer, 14.0, 1).await;

    let (_, unread) = send(&app, get_request("/notifications?unread=true", Some(&customer))).await;
    let unread = unread.as_array().unwrap().clone();
    assert_eq!(unread.len(), 2);

    let id = unread[0]["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        json_request("POST", &format!("/notifications/{id}/read"), Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);

    let (status, body) = send(
        &app,
        json_request("POST", "/notifications/read-all", Some(&customer), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["marked"], 1);

    let (_, unread) = send(&app, get_request("/notifications?unread=true", Some(&customer))).await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn drivers_update_only_their_own_profile() {
    let app = setup();
    let (driver_id, driver) = register_driver(&app, 2.0).await;
    let (_, other) = register_driver(&app, 2.0).await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/drivers/{driver_id}/price"),
            Some(&driver),
            json!({ "price_per_kg": 2.75 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price_per_kg"], 2.75);

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/drivers/{driver_id}/price"),
            Some(&other),
            json!({ "price_per_kg": 1.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/drivers/{driver_id}/availability"),
            Some(&driver),
            json!({ "availability": "busy" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
}
