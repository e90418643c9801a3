//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{forbidden, invalid_id, scheduling_error};
use crate::adapters::http::middleware::{Caller, RequireUser};
use crate::application::handlers::session::{
    CancelSessionCommand, CancelSessionHandler, ConfirmSessionCommand, ConfirmSessionHandler,
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    ListUserSessionsHandler, ListUserSessionsQuery, RescheduleSessionCommand,
    RescheduleSessionHandler, UpdateSessionCommand, UpdateSessionHandler,
};
use crate::domain::foundation::{MentorId, SessionId, UserId};
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::domain::session::{BookingOrigin, SessionStatus};

use super::dto::{
    AdminCreateSessionRequest, ConfirmSessionRequest, CreateSessionRequest, ListSessionsParams,
    RescheduleSessionRequest, SessionListResponse, SessionResponse, UpdateSessionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    confirm_handler: Arc<ConfirmSessionHandler>,
    reschedule_handler: Arc<RescheduleSessionHandler>,
    cancel_handler: Arc<CancelSessionHandler>,
    update_handler: Arc<UpdateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_handler: Arc<ListUserSessionsHandler>,
}

impl SessionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        confirm_handler: Arc<ConfirmSessionHandler>,
        reschedule_handler: Arc<RescheduleSessionHandler>,
        cancel_handler: Arc<CancelSessionHandler>,
        update_handler: Arc<UpdateSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_handler: Arc<ListUserSessionsHandler>,
    ) -> Self {
        Self {
            create_handler,
            confirm_handler,
            reschedule_handler,
            cancel_handler,
            update_handler,
            get_handler,
            list_handler,
        }
    }
}

fn booking_command(
    req: CreateSessionRequest,
    user_id: UserId,
    origin: BookingOrigin,
) -> Result<CreateSessionCommand, Response> {
    let mentor_id = req
        .mentor_id
        .parse::<MentorId>()
        .map_err(|_| invalid_id("mentor"))?;
    Ok(CreateSessionCommand {
        mentor_id,
        user_id,
        time: req.booking_time(),
        duration_minutes: req.duration,
        topic: req.topic,
        notes: req.notes,
        origin,
    })
}

/// How the caller relates to a session it may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Owner,
    Mentor,
    Admin,
}

/// Loads a session the caller may act on.
///
/// Visible to the user who booked it, its mentor and admins. Everyone else
/// gets a 404.
async fn visible_session(
    handlers: &SessionHandlers,
    caller: &Caller,
    session_id: SessionId,
) -> Result<(SessionResponse, Access), Response> {
    let session = handlers
        .get_handler
        .handle(GetSessionQuery { session_id })
        .await
        .map_err(scheduling_error)?;
    let access = if caller.is_admin() {
        Access::Admin
    } else if caller.is_mentor(session.mentor_id()) {
        Access::Mentor
    } else if session.user_id() == &caller.user_id {
        Access::Owner
    } else {
        return Err(scheduling_error(SchedulingError::not_found(
            EntityKind::Session,
            session_id,
        )));
    };
    Ok((SessionResponse::from(&session), access))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Book a session for the caller
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = match booking_command(req, caller.user_id.clone(), BookingOrigin::User) {
        Ok(cmd) => cmd,
        Err(response) => return response,
    };

    match handlers.create_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// POST /api/admin/sessions - Book a confirmed session on behalf of a user
pub async fn admin_create_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Json(req): Json<AdminCreateSessionRequest>,
) -> Response {
    if !caller.is_admin() {
        return forbidden("Admin role required");
    }
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => return scheduling_error(e.into()),
    };
    let cmd = match booking_command(req.booking, user_id, BookingOrigin::Admin) {
        Ok(cmd) => cmd,
        Err(response) => return response,
    };

    match handlers.create_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// GET /api/sessions - List the caller's sessions
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let status = match params.status.as_deref().map(str::parse::<SessionStatus>) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(e)) => return scheduling_error(e.into()),
    };

    let query = ListUserSessionsQuery {
        user_id: caller.user_id,
        status,
    };

    match handlers.list_handler.handle(query).await {
        Ok(sessions) => {
            (StatusCode::OK, Json(SessionListResponse::from(sessions.as_slice()))).into_response()
        }
        Err(e) => scheduling_error(e),
    }
}

/// GET /api/sessions/:id - Get a session
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id("session");
    };

    match visible_session(&handlers, &caller, session_id).await {
        Ok((body, _)) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// POST /api/sessions/:id/confirm - Confirm a pending session
///
/// Confirmation is the mentor accepting the booking, so the booking user
/// cannot confirm its own session.
pub async fn confirm_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Path(session_id): Path<String>,
    body: Option<Json<ConfirmSessionRequest>>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id("session");
    };
    match visible_session(&handlers, &caller, session_id).await {
        Ok((_, Access::Owner)) => {
            return forbidden("Only the mentor or an admin may confirm a session");
        }
        Ok(_) => {}
        Err(response) => return response,
    }

    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = ConfirmSessionCommand {
        session_id,
        meeting: req.meeting(),
    };

    match handlers.confirm_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// POST /api/sessions/:id/reschedule - Move a session to a new slot
pub async fn reschedule_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Path(session_id): Path<String>,
    Json(req): Json<RescheduleSessionRequest>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id("session");
    };
    if let Err(response) = visible_session(&handlers, &caller, session_id).await {
        return response;
    }

    let cmd = RescheduleSessionCommand {
        session_id,
        new_start_utc: req.new_start_utc,
        new_end_utc: req.new_end_utc,
        timezone: req.timezone,
        reason: req.reason,
    };

    match handlers.reschedule_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// POST /api/sessions/:id/cancel - Cancel a session
pub async fn cancel_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id("session");
    };
    if let Err(response) = visible_session(&handlers, &caller, session_id).await {
        return response;
    }

    let cmd = CancelSessionCommand { session_id };

    match handlers.cancel_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}

/// PATCH /api/sessions/:id - Admin edit of time, duration or notes
pub async fn update_session(
    State(handlers): State<SessionHandlers>,
    RequireUser(caller): RequireUser,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateSessionRequest>,
) -> Response {
    if !caller.is_admin() {
        return forbidden("Admin role required");
    }
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id("session");
    };

    let cmd = UpdateSessionCommand {
        session_id,
        scheduled_at: req.scheduled_at,
        duration_minutes: req.duration,
        notes: req.notes,
    };

    match handlers.update_handler.handle(cmd, caller.metadata()).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => scheduling_error(e),
    }
}
