//! ConfirmSessionHandler - Command handler for confirming a pending session.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::domain::session::{ConfirmOutcome, MeetingInfo, MentoringSession};
use crate::ports::SessionStore;

/// Command to confirm a session.
#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: SessionId,
    pub meeting: Option<MeetingInfo>,
}

/// Handler for confirming sessions.
///
/// Re-confirming a `SCHEDULED` session returns it unchanged without a write.
pub struct ConfirmSessionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl ConfirmSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SchedulingError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Session, cmd.session_id))?;

        let expected = session.status();
        match session.confirm(cmd.meeting)? {
            ConfirmOutcome::AlreadyConfirmed => {
                tracing::debug!(session_id = %cmd.session_id, "session already confirmed");
            }
            ConfirmOutcome::Confirmed => {
                self.sessions.confirm(&session, expected).await?;
                tracing::info!(
                    session_id = %cmd.session_id,
                    correlation_id = %metadata.correlation_id(),
                    "session confirmed"
                );
            }
        }
        Ok(session)
    }
}
