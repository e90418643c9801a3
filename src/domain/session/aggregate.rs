//! Mentoring session aggregate.
//!
//! A session is owned by the (mentor, user) pair that booked it; neither
//! identity changes after creation. The scheduled instant is always UTC; the
//! timezone is the civil zone the participants reasoned in and is kept for
//! display only.
//!
//! Mentor name and avatar are a denormalized snapshot. `display_info_complete`
//! records whether that snapshot is usable or needs a read-repair from the
//! mentor lookup.

use serde::{Deserialize, Serialize};

use crate::domain::availability::CivilZone;
use crate::domain::foundation::{
    MentorId, SessionId, StateMachine, Timestamp, UserId, ValidationError,
};
use crate::domain::scheduling::ResolvedSlot;

use super::status::SessionStatus;

/// Maximum length for the session topic.
pub const MAX_TOPIC_LENGTH: usize = 200;

/// Maximum length for session notes.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Longest bookable session, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Validates a session duration in minutes (1-480).
pub fn validate_duration(minutes: i64) -> Result<u32, ValidationError> {
    u32::try_from(minutes)
        .ok()
        .filter(|m| (1..=MAX_DURATION_MINUTES).contains(m))
        .ok_or_else(|| {
            ValidationError::out_of_range("duration", 1, i64::from(MAX_DURATION_MINUTES), minutes)
        })
}

/// Who initiated a booking, which decides the initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrigin {
    /// A user request, awaiting confirmation.
    User,
    /// An administrator booking on a user's behalf, confirmed up front.
    Admin,
}

impl BookingOrigin {
    pub fn initial_status(&self) -> SessionStatus {
        match self {
            BookingOrigin::User => SessionStatus::Pending,
            BookingOrigin::Admin => SessionStatus::Scheduled,
        }
    }
}

/// External meeting attached on confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub meeting_link: Option<String>,
    pub meeting_id: Option<String>,
}

impl MeetingInfo {
    /// Builds meeting info, dropping blank values.
    pub fn new(meeting_link: Option<String>, meeting_id: Option<String>) -> Self {
        Self {
            meeting_link: non_blank(meeting_link),
            meeting_id: non_blank(meeting_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meeting_link.is_none() && self.meeting_id.is_none()
    }
}

/// Mentor display snapshot copied onto the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorDisplay {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl MentorDisplay {
    pub fn new(name: Option<String>, avatar: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            avatar: non_blank(avatar),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.avatar.is_some()
    }
}

/// Everything needed to book a session once its time is resolved.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub mentor_id: MentorId,
    pub user_id: UserId,
    pub slot: ResolvedSlot,
    pub duration_minutes: u32,
    pub topic: String,
    pub notes: Option<String>,
    pub mentor_display: MentorDisplay,
}

/// Administrative metadata patch. Never changes status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    /// Must already be checked against availability.
    pub scheduled_at: Option<Timestamp>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.scheduled_at.is_none() && self.duration_minutes.is_none() && self.notes.is_none()
    }
}

/// Result of a confirm call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// Session was already confirmed; nothing changed.
    AlreadyConfirmed,
}

/// Mentoring session aggregate.
///
/// # Invariants
///
/// - `scheduled_at` is UTC
/// - `duration_minutes` is 1-480
/// - `topic` is non-empty, at most 200 characters
/// - `Cancelled` sessions never change again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentoringSession {
    id: SessionId,
    mentor_id: MentorId,
    user_id: UserId,
    scheduled_at: Timestamp,
    timezone: CivilZone,
    duration_minutes: u32,
    topic: String,
    notes: Option<String>,
    status: SessionStatus,
    mentor_display: MentorDisplay,
    display_info_complete: bool,
    meeting: Option<MeetingInfo>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MentoringSession {
    /// Books a new session.
    ///
    /// Status is `PENDING` for user bookings and `SCHEDULED` for admin ones.
    ///
    /// # Errors
    ///
    /// - `topic` empty or too long
    /// - `notes` too long
    /// - `duration` out of range
    pub fn book(draft: SessionDraft, origin: BookingOrigin) -> Result<Self, ValidationError> {
        let topic = Self::validate_topic(&draft.topic)?;
        let notes = Self::validate_notes(draft.notes)?;
        validate_duration(i64::from(draft.duration_minutes))?;

        let now = Timestamp::now();
        let display_info_complete = draft.mentor_display.is_complete();
        Ok(Self {
            id: SessionId::new(),
            mentor_id: draft.mentor_id,
            user_id: draft.user_id,
            scheduled_at: draft.slot.scheduled_at,
            timezone: draft.slot.timezone,
            duration_minutes: draft.duration_minutes,
            topic,
            notes,
            status: origin.initial_status(),
            mentor_display: draft.mentor_display,
            display_info_complete,
            meeting: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        mentor_id: MentorId,
        user_id: UserId,
        scheduled_at: Timestamp,
        timezone: CivilZone,
        duration_minutes: u32,
        topic: String,
        notes: Option<String>,
        status: SessionStatus,
        mentor_display: MentorDisplay,
        display_info_complete: bool,
        meeting: Option<MeetingInfo>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            mentor_id,
            user_id,
            scheduled_at,
            timezone,
            duration_minutes,
            topic,
            notes,
            status,
            mentor_display,
            display_info_complete,
            meeting,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn mentor_id(&self) -> &MentorId {
        &self.mentor_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn scheduled_at(&self) -> &Timestamp {
        &self.scheduled_at
    }

    /// End of the session (start + duration).
    pub fn ends_at(&self) -> Timestamp {
        self.scheduled_at.plus_minutes(i64::from(self.duration_minutes))
    }

    pub fn timezone(&self) -> CivilZone {
        self.timezone
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn mentor_display(&self) -> &MentorDisplay {
        &self.mentor_display
    }

    pub fn display_info_complete(&self) -> bool {
        self.display_info_complete
    }

    pub fn meeting(&self) -> Option<&MeetingInfo> {
        self.meeting.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Confirms a pending session, attaching meeting details.
    ///
    /// Confirming an already `SCHEDULED` session is a no-op and keeps the
    /// existing meeting info.
    ///
    /// # Errors
    ///
    /// - `status` if the session is `RESCHEDULED` or `CANCELLED`
    pub fn confirm(&mut self, meeting: Option<MeetingInfo>) -> Result<ConfirmOutcome, ValidationError> {
        if self.status == SessionStatus::Scheduled {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        self.status = self.status.transition_to(SessionStatus::Scheduled)?;
        self.meeting = meeting.filter(|m| !m.is_empty());
        self.touch();
        Ok(ConfirmOutcome::Confirmed)
    }

    /// Moves the session to a new, already validated slot.
    ///
    /// The previous slot is not retained.
    ///
    /// # Errors
    ///
    /// - `status` if the session is `CANCELLED`
    /// - `duration` out of range
    pub fn reschedule(&mut self, slot: ResolvedSlot, duration_minutes: u32) -> Result<(), ValidationError> {
        let next = self.status.transition_to(SessionStatus::Rescheduled)?;
        validate_duration(i64::from(duration_minutes))?;

        self.status = next;
        self.scheduled_at = slot.scheduled_at;
        self.timezone = slot.timezone;
        self.duration_minutes = duration_minutes;
        self.touch();
        Ok(())
    }

    /// Cancels the session. Irreversible.
    ///
    /// # Errors
    ///
    /// - `status` if already `CANCELLED`
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Cancelled)?;
        self.touch();
        Ok(())
    }

    /// Applies an administrative metadata patch.
    ///
    /// # Errors
    ///
    /// - `status` if the session is `CANCELLED`
    /// - `duration` or `notes` invalid
    pub fn apply_update(&mut self, update: SessionUpdate) -> Result<(), ValidationError> {
        self.ensure_open()?;
        if let Some(minutes) = update.duration_minutes {
            validate_duration(i64::from(minutes))?;
        }
        let notes = match update.notes {
            Some(notes) => Some(Self::validate_notes(Some(notes))?),
            None => None,
        };

        if let Some(at) = update.scheduled_at {
            self.scheduled_at = at;
        }
        if let Some(minutes) = update.duration_minutes {
            self.duration_minutes = minutes;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        self.touch();
        Ok(())
    }

    /// Overwrites the mentor display snapshot and recomputes completeness.
    pub fn refresh_mentor_display(&mut self, display: MentorDisplay) {
        self.display_info_complete = display.is_complete();
        self.mentor_display = display;
    }

    /// Fails with a `status` error once the session is terminal.
    pub fn ensure_open(&self) -> Result<(), ValidationError> {
        if self.status.is_open() {
            Ok(())
        } else {
            Err(ValidationError::invalid(
                "status",
                format!("session is {}", self.status),
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_topic(topic: &str) -> Result<String, ValidationError> {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        if trimmed.chars().count() > MAX_TOPIC_LENGTH {
            return Err(ValidationError::invalid(
                "topic",
                format!("must be {} characters or less", MAX_TOPIC_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    fn validate_notes(notes: Option<String>) -> Result<Option<String>, ValidationError> {
        let notes = non_blank(notes);
        if let Some(text) = &notes {
            if text.chars().count() > MAX_NOTES_LENGTH {
                return Err(ValidationError::invalid(
                    "notes",
                    format!("must be {} characters or less", MAX_NOTES_LENGTH),
                ));
            }
        }
        Ok(notes)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
