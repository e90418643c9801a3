//! In-memory session store.
//!
//! Performs no slot uniqueness check: two sessions for the same mentor and
//! instant are both stored.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::session::{MentorDisplay, MentoringSession, SessionStatus};
use crate::ports::SessionStore;

/// A reschedule as recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleRecord {
    pub session_id: SessionId,
    pub reason: Option<String>,
}

/// In-memory implementation of `SessionStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, MentoringSession>>>,
    reschedules: Arc<RwLock<Vec<RescheduleRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reschedules recorded for a session, oldest first.
    pub async fn reschedules_of(&self, id: &SessionId) -> Vec<RescheduleRecord> {
        self.reschedules
            .read()
            .await
            .iter()
            .filter(|r| &r.session_id == id)
            .cloned()
            .collect()
    }

    async fn insert(&self, session: &MentoringSession) -> Result<MentoringSession, DomainError> {
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        Ok(session.clone())
    }

    /// Replaces a stored session while its status is still `expected`.
    async fn replace(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let existing = sessions
            .get_mut(session.id())
            .ok_or_else(|| not_found(session.id()))?;
        if existing.status() != expected {
            return Err(DomainError::state_conflict(
                "status",
                format!("session is {}", existing.status()),
            ));
        }
        *existing = session.clone();
        Ok(())
    }
}

fn not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("id", id.to_string())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &MentoringSession) -> Result<MentoringSession, DomainError> {
        self.insert(session).await
    }

    async fn create_for_user_by_admin(
        &self,
        session: &MentoringSession,
        admin: &UserId,
    ) -> Result<MentoringSession, DomainError> {
        tracing::debug!(session_id = %session.id(), admin = %admin, "admin booking stored");
        self.insert(session).await
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MentoringSession>, DomainError> {
        let mut sessions: Vec<MentoringSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| *s.scheduled_at());
        Ok(sessions)
    }

    async fn confirm(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace(session, expected).await
    }

    async fn reschedule(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        self.replace(session, expected).await?;
        self.reschedules.write().await.push(RescheduleRecord {
            session_id: *session.id(),
            reason: reason.map(str::to_string),
        });
        Ok(())
    }

    async fn cancel(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace(session, expected).await
    }

    async fn update(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace(session, expected).await
    }

    async fn refresh_display(&self, id: &SessionId, display: &MentorDisplay) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let existing = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        existing.refresh_mentor_display(display.clone());
        Ok(())
    }
}
