//! HTTP handlers for availability endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{forbidden, invalid_id, scheduling_error};
use crate::adapters::http::middleware::RequireUser;
use crate::application::handlers::availability::{
    CreateAvailabilityCommand, CreateAvailabilityHandler, DeleteAvailabilityCommand,
    DeleteAvailabilityHandler, ListAvailabilityHandler, ListAvailabilityQuery,
    UpdateAvailabilityCommand, UpdateAvailabilityHandler,
};
use crate::domain::foundation::{AvailabilityId, MentorId};

use super::dto::{
    CreateWindowRequest, DeleteWindowResponse, ListWindowsParams, UpdateWindowRequest,
    WindowResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AvailabilityHandlers {
    create_handler: Arc<CreateAvailabilityHandler>,
    update_handler: Arc<UpdateAvailabilityHandler>,
    delete_handler: Arc<DeleteAvailabilityHandler>,
    list_handler: Arc<ListAvailabilityHandler>,
}

impl AvailabilityHandlers {
    pub fn new(
        create_handler: Arc<CreateAvailabilityHandler>,
        update_handler: Arc<UpdateAvailabilityHandler>,
        delete_handler: Arc<DeleteAvailabilityHandler>,
        list_handler: Arc<ListAvailabilityHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            list_handler,
        }
    }
}

const NOT_YOUR_SCHEDULE: &str = "Only the mentor or an admin may change this availability";

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/mentors/:mentor_id/availability - List a mentor's windows
pub async fn list_windows(
    State(handlers): State<AvailabilityHandlers>,
    Path(mentor_id): Path<String>,
    Query(params): Query<ListWindowsParams>,
) -> Response {
    let Ok(mentor_id) = mentor_id.parse::<MentorId>() else {
        return invalid_id("mentor");
    };

    let query = ListAvailabilityQuery {
        mentor_id,
        active_only: params.active_only,
    };

    match handlers.list_handler.handle(query).await {
        Ok(windows) => {
            let body: Vec<WindowResponse> = windows.iter().map(WindowResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => scheduling_error(e),
    }
}

/// POST /api/mentors/:mentor_id/availability - Add a window
pub async fn create_window(
    State(handlers): State<AvailabilityHandlers>,
    RequireUser(caller): RequireUser,
    Path(mentor_id): Path<String>,
    Json(req): Json<CreateWindowRequest>,
) -> Response {
    let Ok(mentor_id) = mentor_id.parse::<MentorId>() else {
        return invalid_id("mentor");
    };
    if !caller.manages(&mentor_id) {
        return forbidden(NOT_YOUR_SCHEDULE);
    }

    let cmd = CreateAvailabilityCommand {
        mentor_id,
        window: req.into(),
    };

    match handlers.create_handler.handle(cmd, caller.metadata()).await {
        Ok(window) => (StatusCode::CREATED, Json(WindowResponse::from(&window))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// PATCH /api/mentors/:mentor_id/availability/:window_id - Partially update a window
pub async fn update_window(
    State(handlers): State<AvailabilityHandlers>,
    RequireUser(caller): RequireUser,
    Path((mentor_id, window_id)): Path<(String, String)>,
    Json(req): Json<UpdateWindowRequest>,
) -> Response {
    let Ok(mentor_id) = mentor_id.parse::<MentorId>() else {
        return invalid_id("mentor");
    };
    let Ok(window_id) = window_id.parse::<AvailabilityId>() else {
        return invalid_id("availability window");
    };
    if !caller.manages(&mentor_id) {
        return forbidden(NOT_YOUR_SCHEDULE);
    }

    let cmd = UpdateAvailabilityCommand {
        mentor_id,
        window_id,
        patch: req.into(),
    };

    match handlers.update_handler.handle(cmd, caller.metadata()).await {
        Ok(window) => (StatusCode::OK, Json(WindowResponse::from(&window))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// DELETE /api/mentors/:mentor_id/availability/:window_id - Remove a window
pub async fn delete_window(
    State(handlers): State<AvailabilityHandlers>,
    RequireUser(caller): RequireUser,
    Path((mentor_id, window_id)): Path<(String, String)>,
) -> Response {
    let Ok(mentor_id) = mentor_id.parse::<MentorId>() else {
        return invalid_id("mentor");
    };
    let Ok(window_id) = window_id.parse::<AvailabilityId>() else {
        return invalid_id("availability window");
    };
    if !caller.manages(&mentor_id) {
        return forbidden(NOT_YOUR_SCHEDULE);
    }

    let cmd = DeleteAvailabilityCommand {
        mentor_id,
        window_id,
    };

    match handlers.delete_handler.handle(cmd, caller.metadata()).await {
        Ok(result) => {
            let body = DeleteWindowResponse {
                window_id: window_id.to_string(),
                removed: result.removed,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => scheduling_error(e),
    }
}
