//! Session store port.
//!
//! Every transition has its own operation so implementations can persist only
//! what the transition changed and record transition metadata.
//!
//! Transition writes carry the status the caller read. A store applies the
//! write only while the stored row still has that status, so a cancel that
//! lands between read and write is never overwritten.
//!
//! # Concurrency
//!
//! Nothing here reserves a slot. Two bookings for the same mentor and instant
//! both succeed unless the implementation enforces uniqueness itself.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{MentorDisplay, MentoringSession, SessionStatus};

/// Repository port for mentoring sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a user-initiated booking and return it as stored.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` (field `scheduledAt`) if the store rejects a duplicate slot
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &MentoringSession) -> Result<MentoringSession, DomainError>;

    /// Persist a booking made by an administrator on the user's behalf.
    async fn create_for_user_by_admin(
        &self,
        session: &MentoringSession,
        admin: &UserId,
    ) -> Result<MentoringSession, DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError>;

    /// All sessions booked by a user, ordered by `scheduled_at` ascending.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MentoringSession>, DomainError>;

    /// Persist a confirmation (status and meeting info).
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` (field `status`) if the stored status is no longer `expected`
    async fn confirm(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError>;

    /// Persist a new slot; `reason` is recorded by the store if supported.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` (field `status`) if the stored status is no longer `expected`
    async fn reschedule(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
        reason: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Persist a cancellation.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` (field `status`) if the stored status is no longer `expected`
    async fn cancel(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError>;

    /// Persist metadata changes (slot, duration, notes, mentor display).
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `InvalidStateTransition` (field `status`) if the stored status is no longer `expected`
    async fn update(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError>;

    /// Overwrite only the mentor display snapshot and its completeness flag.
    ///
    /// Status, slot and every other column are left as stored.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    async fn refresh_display(&self, id: &SessionId, display: &MentorDisplay) -> Result<(), DomainError>;
}
