//! End-to-end checks of the REST surface against an in-memory repository.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use referee_backend::db::{FullRepository, LocalRepository};
use referee_backend::http::{create_router, create_router_with_limit, AppState};

fn app_with(repo: LocalRepository) -> Router {
    let repository: Arc<dyn FullRepository> = Arc::new(repo);
    create_router(AppState::new(repository))
}

fn app() -> Router {
    app_with(LocalRepository::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// Referee with a full-day available window on 2025-01-20. Returns its id.
async fn seed_referee(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/v1/referees", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, _) = post(
        app,
        &format!("/v1/referees/{}/availability", id),
        json!({ "date": "2025-01-20", "start_time": "08:00", "end_time": "18:00", "is_available": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    id
}

async fn seed_game(app: &Router, start: &str, end: &str, required: u32) -> i64 {
    let (status, body) = post(
        app,
        "/v1/games",
        json!({
            "date": "2025-01-20",
            "start_time": start,
            "end_time": end,
            "home_team": "Hawks",
            "away_team": "Owls",
            "referees_required": required
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "unassigned");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_unhealthy_storage() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let (status, body) = get(&app_with(repo), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_unhealthy_storage_maps_to_503() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let (status, body) = get(&app_with(repo), "/v1/referees").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "UNAVAILABLE");
}

#[tokio::test]
async fn test_referee_crud() {
    let app = app();
    let (status, created) = post(
        &app,
        "/v1/referees",
        json!({ "name": "Alex Kim", "email": "alex@league.test" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_available"], true);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = get(&app, &format!("/v1/referees/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Alex Kim");

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/v1/referees/{}", id),
        Some(json!({ "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_available"], false);
    assert_eq!(updated["email"], "alex@league.test");

    let (_, list) = get(&app, "/v1/referees").await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_missing_referee_is_404() {
    let (status, body) = get(&app(), "/v1/referees/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_referee_name_is_400() {
    let (status, body) = post(&app(), "/v1/referees", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_window_is_rejected() {
    let app = app();
    let (_, referee) = post(&app, "/v1/referees", json!({ "name": "Alex" })).await;
    let uri = format!("/v1/referees/{}/availability", referee["id"]);

    for window in [
        json!({ "date": "2025-01-20", "start_time": "12:00", "end_time": "09:00", "is_available": true }),
        json!({ "date": "2025-01-20", "start_time": "12:00", "end_time": "12:00", "is_available": true }),
        json!({ "date": "2025-01-20", "start_time": "9:00", "end_time": "12:00", "is_available": true }),
        json!({ "start_time": "09:00", "end_time": "12:00", "is_available": true }),
    ] {
        let (status, _) = post(&app, &uri, window).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, list) = get(&app, &uri).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_window_without_flag_is_refused() {
    let app = app();
    let (_, referee) = post(&app, "/v1/referees", json!({ "name": "Alex" })).await;
    let uri = format!("/v1/referees/{}/availability", referee["id"]);
    let game = seed_game(&app, "10:00", "12:00", 1).await;

    let (status, _) = post(
        &app,
        &uri,
        json!({ "date": "2025-01-20", "start_time": "09:00", "end_time": "17:00", "reason": "vacation" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = get(&app, &uri).await;
    assert_eq!(list["total"], 0);
    let (_, eligible) = get(&app, &format!("/v1/games/{}/eligible-referees", game)).await;
    assert_eq!(eligible["total"], 0);
}

#[tokio::test]
async fn test_availability_lifecycle() {
    let app = app();
    let id = seed_referee(&app, "Alex").await;
    let uri = format!("/v1/referees/{}/availability", id);

    let (status, record) = post(
        &app,
        &uri,
        json!({
            "date": "2025-01-21",
            "start_time": "09:00",
            "end_time": "11:00",
            "is_available": false,
            "reason": "exam"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["reason"], "exam");

    let (_, all) = get(&app, &uri).await;
    assert_eq!(all["total"], 2);
    let (_, one_day) = get(&app, &format!("{}?date=2025-01-21", uri)).await;
    assert_eq!(one_day["total"], 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("{}/{}", uri, record["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, all) = get(&app, &uri).await;
    assert_eq!(all["total"], 1);
}

#[tokio::test]
async fn test_availability_check_endpoint() {
    let app = app();
    let id = seed_referee(&app, "Alex").await;
    post(
        &app,
        &format!("/v1/referees/{}/availability", id),
        json!({ "date": "2025-01-20", "start_time": "09:00", "end_time": "11:00", "is_available": false }),
    )
    .await;

    let (status, check) = get(
        &app,
        &format!(
            "/v1/referees/{}/availability/check?date=2025-01-20&start=10:00&end=12:00",
            id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["availability_score"], 10);
    assert_eq!(check["has_conflict"], true);

    let (status, _) = get(
        &app,
        &format!(
            "/v1/referees/{}/availability/check?date=2025-01-20&start=12:00&end=10:00",
            id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_eligible_referees_payload_shape() {
    let app = app();
    let alex = seed_referee(&app, "Alex").await;
    let (_, sam) = post(
        &app,
        "/v1/referees",
        json!({ "name": "Sam", "is_available": false }),
    )
    .await;
    post(
        &app,
        &format!("/v1/referees/{}/availability", sam["id"]),
        json!({ "date": "2025-01-20", "start_time": "08:00", "end_time": "18:00", "is_available": true }),
    )
    .await;
    let game = seed_game(&app, "10:00", "12:00", 1).await;

    let (status, body) = get(
        &app,
        &format!("/v1/games/{}/eligible-referees?ranked=true", game),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ranked"], true);
    assert_eq!(body["total"], 1);
    let entry = &body["referees"][0];
    assert_eq!(entry["id"], alex);
    assert_eq!(entry["isAvailable"], true);
    assert_eq!(entry["availabilityScore"], 10);
    assert_eq!(entry["availability"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_assignment_flow_and_status_transitions() {
    let app = app();
    let alex = seed_referee(&app, "Alex").await;
    let sam = seed_referee(&app, "Sam").await;
    let game = seed_game(&app, "10:00", "12:00", 2).await;
    let uri = format!("/v1/games/{}/assignments", game);

    let (status, first) = post(&app, &uri, json!({ "referee_id": alex })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, g) = get(&app, &format!("/v1/games/{}", game)).await;
    assert_eq!(g["status"], "partially_assigned");

    let (status, body) = post(&app, &uri, json!({ "referee_id": alex })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    post(&app, &uri, json!({ "referee_id": sam })).await;
    let (_, listed) = get(&app, "/v1/games?status=assigned").await;
    assert_eq!(listed["total"], 1);

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/v1/assignments/{}", first["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["referee_id"], alex);

    let (_, assignments) = get(&app, &uri).await;
    assert_eq!(assignments["total"], 1);
    let (_, g) = get(&app, &format!("/v1/games/{}", game)).await;
    assert_eq!(g["status"], "partially_assigned");
}

#[tokio::test]
async fn test_auto_assign_endpoint() {
    let app = app();
    seed_referee(&app, "Alex").await;
    seed_referee(&app, "Sam").await;
    seed_referee(&app, "Jo").await;
    let game = seed_game(&app, "10:00", "12:00", 2).await;

    let (status, body) = post(&app, &format!("/v1/games/{}/auto-assign", game), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignments"].as_array().unwrap().len(), 2);
    assert_eq!(body["game"]["status"], "assigned");

    let (_, again) = post(&app, &format!("/v1/games/{}/auto-assign", game), json!({})).await;
    assert!(again["assignments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_game_rejects_assignment() {
    let app = app();
    let alex = seed_referee(&app, "Alex").await;
    let game = seed_game(&app, "10:00", "12:00", 1).await;

    let (status, cancelled) = post(&app, &format!("/v1/games/{}/cancel", game), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, _) = post(
        &app,
        &format!("/v1/games/{}/assignments", game),
        json!({ "referee_id": alex }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_status_filter_is_400() {
    let (status, body) = get(&app(), "/v1/games?status=postponed").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_body_limit_is_enforced() {
    let repository: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    let app = create_router_with_limit(AppState::new(repository), 64);
    let (status, _) = post(
        &app,
        "/v1/referees",
        json!({ "name": "x".repeat(256) }),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
