//! RescheduleSessionHandler - Command handler for moving a session.

use std::sync::Arc;

use crate::application::SchedulingSettings;
use crate::domain::availability::{CivilZone, FIELD_TIMEZONE};
use crate::domain::foundation::{CommandMetadata, SessionId, Timestamp, ValidationError};
use crate::domain::scheduling::{BookingTime, EntityKind, SchedulingError};
use crate::domain::session::{validate_duration, MentoringSession};
use crate::ports::{AvailabilityStore, SessionStore};

const FIELD_NEW_START: &str = "newStartUtc";
const FIELD_NEW_END: &str = "newEndUtc";

/// Command to move a session to a new slot.
#[derive(Debug, Clone)]
pub struct RescheduleSessionCommand {
    pub session_id: SessionId,
    /// ISO-8601 instant.
    pub new_start_utc: String,
    /// ISO-8601 instant; the new duration is `end - start`.
    pub new_end_utc: String,
    /// Display zone; the session's current zone when absent.
    pub timezone: Option<String>,
    pub reason: Option<String>,
}

/// Handler for rescheduling sessions.
///
/// The new start is checked against the mentor's current availability. On any
/// failure nothing is written.
pub struct RescheduleSessionHandler {
    availability: Arc<dyn AvailabilityStore>,
    sessions: Arc<dyn SessionStore>,
    settings: SchedulingSettings,
}

impl RescheduleSessionHandler {
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
        cmd: RescheduleSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SchedulingError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Session, cmd.session_id))?;
        session.ensure_open()?;

        let start = Timestamp::parse_iso(FIELD_NEW_START, &cmd.new_start_utc)?;
        let end = Timestamp::parse_iso(FIELD_NEW_END, &cmd.new_end_utc)?;
        if end <= start {
            return Err(ValidationError::invalid(
                FIELD_NEW_END,
                format!("must be after {}", FIELD_NEW_START),
            )
            .into());
        }
        let duration = validate_duration(end.duration_since(&start).num_minutes())?;
        let timezone = CivilZone::parse_or(FIELD_TIMEZONE, cmd.timezone.as_deref(), session.timezone())?;

        let windows = self.availability.find_by_mentor(session.mentor_id()).await?;
        let booking = BookingTime::Instant {
            scheduled_at: start,
            timezone,
        };
        let slot = self
            .settings
            .resolver
            .resolve_available(&booking, &windows)
            .map_err(|err| {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    error = %err,
                    "reschedule rejected"
                );
                err
            })?;

        let previous = *session.scheduled_at();
        let expected = session.status();
        session.reschedule(slot, duration)?;
        self.sessions
            .reschedule(&session, expected, cmd.reason.as_deref())
            .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            from = %previous.to_iso_string(),
            to = %session.scheduled_at().to_iso_string(),
            correlation_id = %metadata.correlation_id(),
            "session rescheduled"
        );
        Ok(session)
    }
}
