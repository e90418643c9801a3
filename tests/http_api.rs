//! HTTP API tests driving the full router over in-memory stores.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use mentor_scheduler::adapters::http::{api_router, AppPorts};
use mentor_scheduler::adapters::{
    InMemoryAvailabilityStore, InMemoryMentorDirectory, InMemorySessionStore,
};
use mentor_scheduler::application::SchedulingSettings;
use mentor_scheduler::domain::foundation::{MentorId, SessionId};
use mentor_scheduler::ports::Mentor;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn app() -> (Router, MentorId) {
    let mentors = InMemoryMentorDirectory::new();
    let mentor_id = MentorId::new();
    mentors
        .upsert(Mentor {
            id: mentor_id,
            name: "Ana Souza".to_string(),
            avatar: None,
        })
        .await;

    let ports = AppPorts {
        mentors: Arc::new(mentors),
        availability: Arc::new(InMemoryAvailabilityStore::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
    };
    (api_router(&ports, &SchedulingSettings::default()), mentor_id)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user, role)) = caller {
        builder = builder.header("x-user-id", user).header("x-user-role", role);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

const USER: Option<(&str, &str)> = Some(("user-1", "user"));
const ADMIN: Option<(&str, &str)> = Some(("admin-1", "admin"));

/// Mentor callers forward their mentor id as the user id.
fn as_mentor(mentor_id: &str) -> Option<(&str, &str)> {
    Some((mentor_id, "mentor"))
}

async fn add_monday_window(app: &Router, mentor_id: MentorId) -> Value {
    let me = mentor_id.to_string();
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/mentors/{}/availability", mentor_id),
        as_mentor(&me),
        Some(json!({ "dayOfWeek": 1, "startTime": "09:00", "endTime": "12:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn book_monday(app: &Router, mentor_id: MentorId, time: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/sessions",
        USER,
        Some(json!({
            "mentorId": mentor_id.to_string(),
            "date": "2024-06-03",
            "time": time,
            "topic": "Career planning"
        })),
    )
    .await
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/sessions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn sunday_window_keeps_sunday_first_numbering() {
    let (app, mentor_id) = app().await;
    let me = mentor_id.to_string();
    let uri = format!("/api/mentors/{}/availability", mentor_id);

    let (status, created) = send(
        &app,
        "POST",
        &uri,
        as_mentor(&me),
        Some(json!({ "dayOfWeek": 0, "startTime": "14:00", "endTime": "18:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["dayOfWeek"], 0);
    assert_eq!(created["timezone"], "America/Sao_Paulo");

    let window_uri = format!("{}/{}", uri, created["id"].as_str().unwrap());
    let (status, patched) = send(
        &app,
        "PATCH",
        &window_uri,
        as_mentor(&me),
        Some(json!({ "endTime": "19:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["dayOfWeek"], 0);
    assert_eq!(patched["endTime"], "19:30");

    let (_, listed) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn inverted_window_names_end_time() {
    let (app, mentor_id) = app().await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/mentors/{}/availability", mentor_id),
        ADMIN,
        Some(json!({ "dayOfWeek": 2, "startTime": "12:00", "endTime": "09:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "endTime");
}

#[tokio::test]
async fn deleting_a_window_twice_succeeds() {
    let (app, mentor_id) = app().await;
    let window = add_monday_window(&app, mentor_id).await;
    let uri = format!(
        "/api/mentors/{}/availability/{}",
        mentor_id,
        window["id"].as_str().unwrap()
    );

    let me = mentor_id.to_string();
    let (status, first) = send(&app, "DELETE", &uri, as_mentor(&me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["removed"], true);

    let (status, second) = send(&app, "DELETE", &uri, as_mentor(&me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["removed"], false);
}

#[tokio::test]
async fn booking_lifecycle_over_http() {
    let (app, mentor_id) = app().await;
    add_monday_window(&app, mentor_id).await;

    let (status, booked) = book_monday(&app, mentor_id, "10:30").await;
    assert_eq!(status, StatusCode::CREATED, "{}", booked);
    assert_eq!(booked["status"], "PENDING");
    assert_eq!(booked["scheduledAt"], "2024-06-03T13:30:00.000Z");
    assert_eq!(booked["duration"], 60);
    assert_eq!(booked["mentorName"], "Ana Souza");
    let uri = format!("/api/sessions/{}", booked["id"].as_str().unwrap());
    let me = mentor_id.to_string();

    let (status, _) = send(&app, "POST", &format!("{}/confirm", uri), USER, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, confirmed) = send(
        &app,
        "POST",
        &format!("{}/confirm", uri),
        as_mentor(&me),
        Some(json!({ "meetingLink": "https://meet.example.com/abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "SCHEDULED");
    assert_eq!(confirmed["meetingLink"], "https://meet.example.com/abc");

    let (status, moved) = send(
        &app,
        "POST",
        &format!("{}/reschedule", uri),
        USER,
        Some(json!({
            "newStartUtc": "2024-06-10T12:00:00Z",
            "newEndUtc": "2024-06-10T12:30:00Z",
            "reason": "conflict"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", moved);
    assert_eq!(moved["status"], "RESCHEDULED");
    assert_eq!(moved["duration"], 30);

    let (status, cancelled) = send(&app, "POST", &format!("{}/cancel", uri), USER, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    let (status, again) = send(&app, "POST", &format!("{}/cancel", uri), USER, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["details"]["field"], "status");

    let (status, list) = send(&app, "GET", "/api/sessions?status=CANCELLED", USER, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn booking_outside_availability_is_bad_request() {
    let (app, mentor_id) = app().await;
    add_monday_window(&app, mentor_id).await;

    let (status, body) = book_monday(&app, mentor_id, "13:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "scheduledAt");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/sessions/{}", SessionId::new()),
        USER,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["entity"], "Session");
}

#[tokio::test]
async fn other_users_cannot_see_a_session() {
    let (app, mentor_id) = app().await;
    add_monday_window(&app, mentor_id).await;
    let (_, booked) = book_monday(&app, mentor_id, "09:00").await;
    let uri = format!("/api/sessions/{}", booked["id"].as_str().unwrap());

    let (status, _) = send(&app, "GET", &uri, Some(("user-2", "user")), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn only_the_mentor_or_an_admin_changes_availability() {
    let (app, mentor_id) = app().await;
    let uri = format!("/api/mentors/{}/availability", mentor_id);
    let window = json!({ "dayOfWeek": 3, "startTime": "09:00", "endTime": "11:00" });
    let other = MentorId::new().to_string();

    let (status, body) = send(&app, "POST", &uri, USER, Some(window.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = send(&app, "POST", &uri, as_mentor(&other), Some(window.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A plain user whose id happens to be the mentor id is still a user.
    let me = mentor_id.to_string();
    let (status, _) = send(&app, "POST", &uri, Some((me.as_str(), "user")), Some(window.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(&app, "POST", &uri, ADMIN, Some(window)).await;
    assert_eq!(status, StatusCode::CREATED);
    let window_uri = format!("{}/{}", uri, created["id"].as_str().unwrap());

    let (status, _) = send(&app, "PATCH", &window_uri, USER, Some(json!({ "isActive": false }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "DELETE", &window_uri, USER, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, listed) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn session_mentor_can_see_and_cancel_it() {
    let (app, mentor_id) = app().await;
    add_monday_window(&app, mentor_id).await;
    let (_, booked) = book_monday(&app, mentor_id, "11:00").await;
    let uri = format!("/api/sessions/{}", booked["id"].as_str().unwrap());

    let other = MentorId::new().to_string();
    let (status, _) = send(&app, "GET", &uri, as_mentor(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let me = mentor_id.to_string();
    let (status, seen) = send(&app, "GET", &uri, as_mentor(&me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seen["userId"], "user-1");

    let (status, cancelled) = send(&app, "POST", &format!("{}/cancel", uri), as_mentor(&me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");
}

#[tokio::test]
async fn admin_endpoints_require_admin_role() {
    let (app, mentor_id) = app().await;
    add_monday_window(&app, mentor_id).await;
    let booking = json!({
        "userId": "user-1",
        "mentorId": mentor_id.to_string(),
        "scheduledAt": "2024-06-03T14:00:00Z",
        "timezone": "America/Sao_Paulo",
        "topic": "Portfolio review"
    });

    let (status, _) = send(&app, "POST", "/api/admin/sessions", USER, Some(booking.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(&app, "POST", "/api/admin/sessions", ADMIN, Some(booking)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["status"], "SCHEDULED");
    assert_eq!(created["userId"], "user-1");

    let uri = format!("/api/sessions/{}", created["id"].as_str().unwrap());
    let (status, _) = send(&app, "PATCH", &uri, USER, Some(json!({ "notes": "x" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        ADMIN,
        Some(json!({ "duration": 90, "notes": "Bring the latest draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["duration"], 90);
    assert_eq!(updated["notes"], "Bring the latest draft");
}

#[tokio::test]
async fn malformed_path_id_is_bad_request() {
    let (app, _) = app().await;
    let (status, body) = send(&app, "GET", "/api/sessions/not-a-uuid", USER, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
