//! HTTP adapter - REST API over the scheduling use cases.
//!
//! Routes:
//! - `/health`
//! - `/api/mentors/:mentor_id/availability[/:window_id]`
//! - `/api/sessions[/:id[/confirm|/reschedule|/cancel]]`
//! - `/api/admin/sessions`

pub mod availability;
pub mod error;
mod health;
pub mod middleware;
pub mod session;

use std::sync::Arc;

use axum::Router;

use crate::application::handlers::{
    CancelSessionHandler, ConfirmSessionHandler, CreateAvailabilityHandler, CreateSessionHandler,
    DeleteAvailabilityHandler, GetSessionHandler, ListAvailabilityHandler,
    ListUserSessionsHandler, RescheduleSessionHandler, UpdateAvailabilityHandler,
    UpdateSessionHandler,
};
use crate::application::SchedulingSettings;
use crate::ports::{AvailabilityStore, MentorLookup, SessionStore};

pub use availability::AvailabilityHandlers;
pub use error::ErrorResponse;
pub use session::SessionHandlers;

/// Port implementations the API runs on.
#[derive(Clone)]
pub struct AppPorts {
    pub mentors: Arc<dyn MentorLookup>,
    pub availability: Arc<dyn AvailabilityStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppPorts {
    pub fn availability_handlers(&self, settings: &SchedulingSettings) -> AvailabilityHandlers {
        AvailabilityHandlers::new(
            Arc::new(CreateAvailabilityHandler::new(
                self.mentors.clone(),
                self.availability.clone(),
                *settings,
            )),
            Arc::new(UpdateAvailabilityHandler::new(self.availability.clone())),
            Arc::new(DeleteAvailabilityHandler::new(self.availability.clone())),
            Arc::new(ListAvailabilityHandler::new(self.availability.clone())),
        )
    }

    pub fn session_handlers(&self, settings: &SchedulingSettings) -> SessionHandlers {
        SessionHandlers::new(
            Arc::new(CreateSessionHandler::new(
                self.mentors.clone(),
                self.availability.clone(),
                self.sessions.clone(),
                *settings,
            )),
            Arc::new(ConfirmSessionHandler::new(self.sessions.clone())),
            Arc::new(RescheduleSessionHandler::new(
                self.availability.clone(),
                self.sessions.clone(),
                *settings,
            )),
            Arc::new(CancelSessionHandler::new(self.sessions.clone())),
            Arc::new(UpdateSessionHandler::new(
                self.availability.clone(),
                self.sessions.clone(),
                *settings,
            )),
            Arc::new(GetSessionHandler::new(
                self.mentors.clone(),
                self.sessions.clone(),
            )),
            Arc::new(ListUserSessionsHandler::new(
                self.mentors.clone(),
                self.sessions.clone(),
            )),
        )
    }
}

/// Builds the complete API router, without transport layers.
pub fn api_router(ports: &AppPorts, settings: &SchedulingSettings) -> Router {
    let sessions = ports.session_handlers(settings);
    Router::new()
        .merge(health::health_routes())
        .nest(
            "/api/mentors",
            availability::availability_routes(ports.availability_handlers(settings)),
        )
        .nest("/api/sessions", session::session_routes(sessions.clone()))
        .nest("/api/admin", session::admin_session_routes(sessions))
}
