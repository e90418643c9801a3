//! GetSessionHandler - Query handler for retrieving a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::domain::session::MentoringSession;
use crate::ports::{MentorLookup, SessionStore};

use super::display_repair::MentorDisplayRepair;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session details.
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionStore>,
    repair: MentorDisplayRepair,
}

impl GetSessionHandler {
    pub fn new(mentors: Arc<dyn MentorLookup>, sessions: Arc<dyn SessionStore>) -> Self {
        let repair = MentorDisplayRepair::new(mentors, sessions.clone());
        Self { sessions, repair }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<MentoringSession, SchedulingError> {
        let mut session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Session, query.session_id))?;

        self.repair.repair(&mut session).await;
        Ok(session)
    }
}
