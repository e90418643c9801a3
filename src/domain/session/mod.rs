//! Session lifecycle module.
//!
//! A mentoring session moves PENDING -> SCHEDULED -> RESCHEDULED -> CANCELLED
//! according to [`SessionStatus`]; every transition goes through the
//! [`MentoringSession`] aggregate.

mod aggregate;
mod status;

pub use aggregate::{
    validate_duration, BookingOrigin, ConfirmOutcome, MeetingInfo, MentorDisplay,
    MentoringSession, SessionDraft, SessionUpdate, MAX_DURATION_MINUTES, MAX_NOTES_LENGTH,
    MAX_TOPIC_LENGTH,
};
pub use status::SessionStatus;
