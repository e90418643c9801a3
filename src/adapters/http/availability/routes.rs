//! HTTP routes for availability endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    create_window, delete_window, list_windows, update_window, AvailabilityHandlers,
};

/// Creates the availability router, nested under `/api/mentors`.
pub fn availability_routes(handlers: AvailabilityHandlers) -> Router {
    Router::new()
        .route("/:mentor_id/availability", get(list_windows).post(create_window))
        .route(
            "/:mentor_id/availability/:window_id",
            patch(update_window).delete(delete_window),
        )
        .with_state(handlers)
}
