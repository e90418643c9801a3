//! ListUserSessionsHandler - Query handler for a user's sessions.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::scheduling::SchedulingError;
use crate::domain::session::{MentoringSession, SessionStatus};
use crate::ports::{MentorLookup, SessionStore};

use super::display_repair::MentorDisplayRepair;

/// Query for the sessions booked by a user.
#[derive(Debug, Clone)]
pub struct ListUserSessionsQuery {
    pub user_id: UserId,
    /// Only sessions in this status, when set.
    pub status: Option<SessionStatus>,
}

/// Handler for listing a user's sessions, ordered by start time.
pub struct ListUserSessionsHandler {
    sessions: Arc<dyn SessionStore>,
    repair: MentorDisplayRepair,
}

impl ListUserSessionsHandler {
    pub fn new(mentors: Arc<dyn MentorLookup>, sessions: Arc<dyn SessionStore>) -> Self {
        let repair = MentorDisplayRepair::new(mentors, sessions.clone());
        Self { sessions, repair }
    }

    pub async fn handle(
        &self,
        query: ListUserSessionsQuery,
    ) -> Result<Vec<MentoringSession>, SchedulingError> {
        let mut sessions = self.sessions.find_by_user(&query.user_id).await?;
        if let Some(status) = query.status {
            sessions.retain(|s| s.status() == status);
        }
        sessions.sort_by_key(|s| *s.scheduled_at());

        for session in sessions.iter_mut() {
            self.repair.repair(session).await;
        }
        Ok(sessions)
    }
}
