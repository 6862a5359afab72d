mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{ADMIN_PASSWORD, STORE_PASSWORD, test_config};

async fn spawn_app() -> Router {
    let state = workhub::api::create_app_state_from_config(test_config(), None)
        .await
        .expect("Failed to create app state");
    workhub::api::router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/admin",
        None,
        Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn worker_json(nie: &str) -> Value {
    json!({
        "name": "John Doe",
        "last_name": "Smith",
        "email": "john@example.com",
        "nie": nie,
        "position": "Cashier",
        "status": "Active",
        "on_trial": "no"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/admin/workers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/api/admin/workers", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_failure() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/admin",
        None,
        Some(json!({ "username": "admin", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_worker_crud() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/workers/create",
        Some(&token),
        Some(worker_json("X1234567Z")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "johndoe");
    let id = body["worker"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/admin/workers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workers"].as_array().unwrap().len(), 1);

    let mut update = worker_json("X1234567Z");
    update["position"] = json!("Supervisor");
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/admin/workers/update/{id}"),
        Some(&token),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["worker"]["position"], "Supervisor");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/workers/delete/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/admin/workers/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Worker not found");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/workers/delete/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_and_conflict_responses() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let mut invalid = worker_json("X1234567Z");
    invalid["status"] = json!("Retired");
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/workers/create",
        Some(&token),
        Some(invalid),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"].as_str().unwrap().starts_with("status"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/workers/create",
        Some(&token),
        Some(worker_json("X1234567Z")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/workers/create",
        Some(&token),
        Some(worker_json("X1234567Z")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.get("details").is_none());

    let (status, _) = send(
        &app,
        "GET",
        "/api/admin/workers/not-a-uuid",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_role_limits() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/stores/create",
        Some(&token),
        Some(json!({ "name": "Sol", "city": "Madrid", "phone": 912345678, "status": "Open" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let store_id = body["store"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/store",
        None,
        Some(json!({ "username": "sol", "password": STORE_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let store_token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "GET", "/api/admin/workers", Some(&store_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/metrics", Some(&store_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/timelog/create",
        Some(&store_token),
        Some(json!({ "store_id": store_id, "worker_id": "w-1", "direction": "Entry" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["timelog"]["timestamp"].is_string());

    let (status, body) = send(&app, "GET", "/api/admin/timelogs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timelogs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, _) = send(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has been revoked");
}

#[tokio::test]
async fn test_user_listing_hides_hashes() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "admin");
    assert_eq!(users[0]["role"], "admin");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_holiday_endpoints() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/workers/create",
        Some(&token),
        Some(worker_json("X1234567Z")),
    )
    .await;
    let worker_id = body["worker"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/holidays/create",
        Some(&token),
        Some(json!({
            "worker_id": worker_id,
            "start_date": "2024-05-10",
            "end_date": "2024-05-01",
            "status": "Pending"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "end_date cannot be earlier than start_date");

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/holidays/create",
        Some(&token),
        Some(json!({
            "worker_id": worker_id,
            "start_date": "2024-05-01",
            "end_date": "2024-05-10",
            "status": "Pending"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let holiday_id = body["holiday"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "GET",
        "/api/admin/holidays/workers",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holidays"][0]["worker_name"], "John Doe");
    assert_eq!(body["holidays"][0]["worker_last_name"], "Smith");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/admin/holidays/update/{holiday_id}"),
        Some(&token),
        Some(json!({
            "worker_id": worker_id,
            "start_date": "2024-05-01",
            "end_date": "2024-05-10",
            "status": "Taken"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holiday"]["status"], "Taken");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/holidays/delete/{holiday_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/admin/holidays/delete/{holiday_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_for_admin() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
