//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    admin_create_session, cancel_session, confirm_session, create_session, get_session,
    list_sessions, reschedule_session, update_session, SessionHandlers,
};

/// Creates the session router, nested under `/api/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route("/:id", get(get_session).patch(update_session))
        .route("/:id/confirm", post(confirm_session))
        .route("/:id/reschedule", post(reschedule_session))
        .route("/:id/cancel", post(cancel_session))
        .with_state(handlers)
}

/// Creates the admin session router, nested under `/api/admin`.
pub fn admin_session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/sessions", post(admin_create_session))
        .with_state(handlers)
}
