//! CancelSessionHandler - Command handler for cancelling a session.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::domain::session::MentoringSession;
use crate::ports::SessionStore;

/// Command to cancel a session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
}

/// Handler for cancelling sessions. Cancellation is terminal.
pub struct CancelSessionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl CancelSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SchedulingError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Session, cmd.session_id))?;

        let previous = session.status();
        session.cancel()?;
        self.sessions.cancel(&session, previous).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            from = %previous,
            actor = %metadata.actor,
            correlation_id = %metadata.correlation_id(),
            "session cancelled"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::session::SessionStatus;

    #[tokio::test]
    async fn cancels_from_every_open_status() {
        let mut scheduled = pending_session();
        scheduled.confirm(None).unwrap();
        let mut rescheduled = pending_session();
        rescheduled
            .reschedule(slot("2024-06-10T13:00:00Z"), 60)
            .unwrap();

        for session in [pending_session(), scheduled, rescheduled] {
            let store = Arc::new(MockSessions::with(session.clone()));
            let handler = CancelSessionHandler::new(store.clone());

            let cancelled = handler
                .handle(
                    CancelSessionCommand {
                        session_id: *session.id(),
                    },
                    metadata(),
                )
                .await
                .unwrap();

            assert_eq!(cancelled.status(), SessionStatus::Cancelled);
            assert_eq!(store.stored(session.id()).unwrap().status(), SessionStatus::Cancelled);
        }
    }

    #[tokio::test]
    async fn second_cancel_fails() {
        let session = pending_session();
        let store = Arc::new(MockSessions::with(session.clone()));
        let handler = CancelSessionHandler::new(store.clone());
        let cmd = CancelSessionCommand {
            session_id: *session.id(),
        };

        handler.handle(cmd.clone(), metadata()).await.unwrap();
        let err = handler.handle(cmd, metadata()).await.unwrap_err();

        assert_eq!(err.field(), Some("status"));
        assert_eq!(store.writes(), vec!["cancel"]);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let handler = CancelSessionHandler::new(Arc::new(MockSessions::new()));
        let err = handler
            .handle(
                CancelSessionCommand {
                    session_id: SessionId::new(),
                },
                metadata(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
