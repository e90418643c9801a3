//! UpdateSessionHandler - Command handler for administrative metadata patches.

use std::sync::Arc;

use crate::application::SchedulingSettings;
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp};
use crate::domain::scheduling::{BookingTime, EntityKind, SchedulingError, FIELD_SCHEDULED_AT};
use crate::domain::session::{validate_duration, MentoringSession, SessionUpdate};
use crate::ports::{AvailabilityStore, SessionStore};

/// Command to patch session metadata. Status is never changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateSessionCommand {
    pub session_id: SessionId,
    /// ISO-8601 instant, re-validated against availability.
    pub scheduled_at: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Handler for updating session metadata.
pub struct UpdateSessionHandler {
    availability: Arc<dyn AvailabilityStore>,
    sessions: Arc<dyn SessionStore>,
    settings: SchedulingSettings,
}

impl UpdateSessionHandler {
    pub fn new(
        availability: Arc<dyn AvailabilityStore>,
        sessions: Arc<dyn SessionStore>,
        settings: SchedulingSettings,
    ) -> Self {
        Self {
            availability,
            sessions,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SchedulingError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Session, cmd.session_id))?;
        session.ensure_open()?;

        let duration_minutes = cmd.duration_minutes.map(validate_duration).transpose()?;

        let scheduled_at = match cmd.scheduled_at.as_deref() {
            Some(raw) => {
                let booking = BookingTime::Instant {
                    scheduled_at: Timestamp::parse_iso(FIELD_SCHEDULED_AT, raw)?,
                    timezone: session.timezone(),
                };
                let windows = self.availability.find_by_mentor(session.mentor_id()).await?;
                let slot = self.settings.resolver.resolve_available(&booking, &windows)?;
                Some(slot.scheduled_at)
            }
            None => None,
        };

        let update = SessionUpdate {
            scheduled_at,
            duration_minutes,
            notes: cmd.notes,
        };
        if update.is_empty() {
            return Ok(session);
        }

        let expected = session.status();
        session.apply_update(update)?;
        self.sessions.update(&session, expected).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            actor = %metadata.actor,
            correlation_id = %metadata.correlation_id(),
            "session updated"
        );
        Ok(session)
    }
}
