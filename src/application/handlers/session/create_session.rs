//! CreateSessionHandler - Command handler for booking a mentoring session.

use std::sync::Arc;

use crate::application::SchedulingSettings;
use crate::domain::foundation::{CommandMetadata, MentorId, UserId};
use crate::domain::scheduling::{BookingTime, BookingTimeInput, EntityKind, SchedulingError};
use crate::domain::session::{validate_duration, BookingOrigin, MentoringSession, SessionDraft};
use crate::ports::{AvailabilityStore, MentorLookup, SessionStore};

use super::display_repair::MentorDisplayRepair;

/// Command to book a session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub mentor_id: MentorId,
    /// User the session is booked for.
    pub user_id: UserId,
    pub time: BookingTimeInput,
    /// Minutes; the configured default applies when absent.
    pub duration_minutes: Option<i64>,
    pub topic: String,
    pub notes: Option<String>,
    pub origin: BookingOrigin,
}

/// Handler for booking sessions.
///
/// The booking is validated against availability as currently stored. No slot
/// is reserved: concurrent bookings of the same instant all pass here.
pub struct CreateSessionHandler {
    mentors: Arc<dyn MentorLookup>,
    availability: Arc<dyn AvailabilityStore>,
    sessions: Arc<dyn SessionStore>,
    repair: MentorDisplayRepair,
    settings: SchedulingSettings,
}

impl CreateSessionHandler {
    pub fn new(
        mentors: Arc<dyn MentorLookup>,
        availability: Arc<dyn AvailabilityStore>,
        sessions: Arc<dyn SessionStore>,
        settings: SchedulingSettings,
    ) -> Self {
        let repair = MentorDisplayRepair::new(mentors.clone(), sessions.clone());
        Self {
            mentors,
            availability,
            sessions,
            repair,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SchedulingError> {
        if cmd.origin == BookingOrigin::Admin && !metadata.is_admin() {
            return Err(SchedulingError::validation(
                "role",
                "only administrators can book on behalf of a user",
            ));
        }

        // 1. Validate input shape before any I/O
        let booking = BookingTime::from_input(&cmd.time, self.settings.default_zone)?;
        let duration_minutes = match cmd.duration_minutes {
            Some(minutes) => validate_duration(minutes)?,
            None => self.settings.default_duration_minutes,
        };

        // 2. Mentor must exist
        let mentor = self
            .mentors
            .find_by_id(&cmd.mentor_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Mentor, cmd.mentor_id))?;

        // 3. Resolve against current availability
        let windows = self.availability.find_by_mentor(&cmd.mentor_id).await?;
        let slot = self
            .settings
            .resolver
            .resolve_available(&booking, &windows)
            .map_err(|err| {
                tracing::warn!(
                    mentor_id = %cmd.mentor_id,
                    error = %err,
                    "booking rejected"
                );
                err
            })?;

        // 4. Build and persist
        let session = MentoringSession::book(
            SessionDraft {
                mentor_id: cmd.mentor_id,
                user_id: cmd.user_id,
                slot,
                duration_minutes,
                topic: cmd.topic,
                notes: cmd.notes,
                mentor_display: mentor.display(),
            },
            cmd.origin,
        )?;

        let mut stored = match cmd.origin {
            BookingOrigin::User => self.sessions.create(&session).await?,
            BookingOrigin::Admin => {
                self.sessions
                    .create_for_user_by_admin(&session, &metadata.actor)
                    .await?
            }
        };

        // 5. Stores may hand back a placeholder snapshot
        self.repair.repair_with(&mut stored, &mentor).await;

        tracing::info!(
            session_id = %stored.id(),
            mentor_id = %stored.mentor_id(),
            user_id = %stored.user_id(),
            status = %stored.status(),
            scheduled_at = %stored.scheduled_at().to_iso_string(),
            correlation_id = %metadata.correlation_id(),
            "session created"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ActorRole;
    use crate::domain::scheduling::{REQUEST_FIELD, UNAVAILABLE_MESSAGE};
    use crate::domain::session::SessionStatus;
    use crate::ports::Mentor;

    struct Fixture {
        mentor: Mentor,
        sessions: Arc<MockSessions>,
        handler: CreateSessionHandler,
    }

    /// Mentor with a Monday 09:00-12:00 Sao Paulo window.
    fn fixture_with(sessions: MockSessions, avatar: Option<&str>) -> Fixture {
        let mentor = mentor("Ana Souza", avatar);
        let sessions = Arc::new(sessions);
        let handler = CreateSessionHandler::new(
            Arc::new(MockMentors::with(mentor.clone())),
            Arc::new(MockAvailability::with(vec![window(mentor.id, 1, "09:00", "12:00")])),
            sessions.clone(),
            SchedulingSettings::default(),
        );
        Fixture {
            mentor,
            sessions,
            handler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockSessions::new(), Some("https://cdn/ana.png"))
    }

    fn civil(date: &str, time: &str) -> BookingTimeInput {
        BookingTimeInput {
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            scheduled_at: None,
            timezone: Some("America/Sao_Paulo".to_string()),
        }
    }

    fn command(f: &Fixture, time: BookingTimeInput) -> CreateSessionCommand {
        CreateSessionCommand {
            mentor_id: f.mentor.id,
            user_id: user("user-1"),
            time,
            duration_minutes: None,
            topic: "Career planning".to_string(),
            notes: None,
            origin: BookingOrigin::User,
        }
    }

    #[tokio::test]
    async fn books_inside_window_as_pending() {
        let f = fixture();
        // 2024-06-03 is a Monday.
        let session = f
            .handler
            .handle(command(&f, civil("2024-06-03", "10:30")), metadata())
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Pending);
        assert_eq!(session.scheduled_at().to_iso_string(), "2024-06-03T13:30:00.000Z");
        assert_eq!(session.timezone().name(), "America/Sao_Paulo");
        assert_eq!(session.duration_minutes(), 60);
        assert_eq!(f.sessions.writes(), vec!["create"]);
    }

    #[tokio::test]
    async fn rejects_outside_window() {
        let f = fixture();
        let err = f
            .handler
            .handle(command(&f, civil("2024-06-03", "13:00")), metadata())
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("scheduledAt"));
        assert!(err.to_string().contains("no matching availability"));
        assert!(f.sessions.all().is_empty());
    }

    #[tokio::test]
    async fn instant_shape_is_accepted() {
        let f = fixture();
        let time = BookingTimeInput {
            scheduled_at: Some("2024-06-03T13:30:00Z".to_string()),
            timezone: Some("Europe/Lisbon".to_string()),
            ..Default::default()
        };

        let session = f.handler.handle(command(&f, time), metadata()).await.unwrap();

        assert_eq!(session.scheduled_at().to_iso_string(), "2024-06-03T13:30:00.000Z");
        assert_eq!(session.timezone().name(), "Europe/Lisbon");
    }

    #[tokio::test]
    async fn instant_shape_without_timezone_is_rejected() {
        let f = fixture();
        let time = BookingTimeInput {
            scheduled_at: Some("2024-06-03T13:30:00Z".to_string()),
            ..Default::default()
        };

        let err = f.handler.handle(command(&f, time), metadata()).await.unwrap_err();
        assert_eq!(err.field(), Some("timezone"));
    }

    #[tokio::test]
    async fn admin_booking_is_scheduled() {
        let f = fixture();
        let mut cmd = command(&f, civil("2024-06-03", "09:00"));
        cmd.origin = BookingOrigin::Admin;
        let admin = metadata().with_role(ActorRole::Admin);

        let session = f.handler.handle(cmd, admin).await.unwrap();

        assert_eq!(session.status(), SessionStatus::Scheduled);
        assert_eq!(f.sessions.writes(), vec!["create_for_user_by_admin"]);
    }

    #[tokio::test]
    async fn admin_booking_requires_admin_role() {
        let f = fixture();
        let mut cmd = command(&f, civil("2024-06-03", "09:00"));
        cmd.origin = BookingOrigin::Admin;

        let err = f.handler.handle(cmd, metadata()).await.unwrap_err();
        assert_eq!(err.field(), Some("role"));
    }

    #[tokio::test]
    async fn unknown_mentor_is_not_found() {
        let f = fixture();
        let mut cmd = command(&f, civil("2024-06-03", "10:00"));
        cmd.mentor_id = MentorId::new();

        let err = f.handler.handle(cmd, metadata()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn duration_out_of_range_is_rejected() {
        let f = fixture();
        let mut cmd = command(&f, civil("2024-06-03", "10:00"));
        cmd.duration_minutes = Some(600);

        let err = f.handler.handle(cmd, metadata()).await.unwrap_err();
        assert_eq!(err.field(), Some("duration"));
    }

    #[tokio::test]
    async fn placeholder_display_is_repaired() {
        let f = fixture_with(MockSessions::dropping_display(), Some("https://cdn/ana.png"));

        let session = f
            .handler
            .handle(command(&f, civil("2024-06-03", "10:00")), metadata())
            .await
            .unwrap();

        assert!(session.display_info_complete());
        assert_eq!(session.mentor_display().name.as_deref(), Some("Ana Souza"));
        assert_eq!(f.sessions.writes(), vec!["create", "refresh_display"]);
        assert!(f.sessions.stored(session.id()).unwrap().display_info_complete());
    }

    #[tokio::test]
    async fn store_failure_is_wrapped() {
        let f = fixture_with(MockSessions::failing(), Some("a.png"));
        let err = f
            .handler
            .handle(command(&f, civil("2024-06-03", "10:00")), metadata())
            .await
            .unwrap_err();

        assert_eq!(err, SchedulingError::validation(REQUEST_FIELD, UNAVAILABLE_MESSAGE));
    }

    #[tokio::test]
    async fn concurrent_bookings_of_same_instant_both_pass() {
        let f = fixture();
        let first = command(&f, civil("2024-06-03", "10:00"));
        let second = first.clone();

        let (a, b) = tokio::join!(
            f.handler.handle(first, metadata()),
            f.handler.handle(second, metadata())
        );

        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.scheduled_at(), b.scheduled_at());
        assert_ne!(a.id(), b.id());
        assert_eq!(f.sessions.all().len(), 2);
    }
}
