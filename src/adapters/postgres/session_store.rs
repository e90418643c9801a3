//! PostgreSQL implementation of SessionStore.
//!
//! A partial unique index keeps one live session per mentor and start
//! instant; violations surface as a `scheduledAt` validation error.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::availability::CivilZone;
use crate::domain::foundation::{
    DomainError, ErrorCode, MentorId, SessionId, Timestamp, UserId,
};
use crate::domain::scheduling::FIELD_SCHEDULED_AT;
use crate::domain::session::{MeetingInfo, MentorDisplay, MentoringSession, SessionStatus};
use crate::ports::SessionStore;

use super::support::{column, corrupt, is_unique_violation, query_failed};

const SELECT_SESSION: &str = r#"
    SELECT id, mentor_id, user_id, scheduled_at, timezone, duration_minutes,
           topic, notes, status, mentor_name, mentor_avatar, display_info_complete,
           meeting_link, meeting_id, created_at, updated_at
    FROM mentoring_sessions
"#;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(
        &self,
        session: &MentoringSession,
        booked_by_admin: Option<&UserId>,
    ) -> Result<MentoringSession, DomainError> {
        let display = session.mentor_display();
        let meeting = session.meeting();
        sqlx::query(
            r#"
            INSERT INTO mentoring_sessions (
                id, mentor_id, user_id, scheduled_at, timezone, duration_minutes,
                topic, notes, status, mentor_name, mentor_avatar, display_info_complete,
                meeting_link, meeting_id, booked_by_admin, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.mentor_id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(session.scheduled_at().as_datetime())
        .bind(session.timezone().name())
        .bind(session.duration_minutes() as i32)
        .bind(session.topic())
        .bind(session.notes())
        .bind(session.status().as_str())
        .bind(display.name.as_deref())
        .bind(display.avatar.as_deref())
        .bind(session.display_info_complete())
        .bind(meeting.and_then(|m| m.meeting_link.as_deref()))
        .bind(meeting.and_then(|m| m.meeting_id.as_deref()))
        .bind(booked_by_admin.map(UserId::as_str))
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| slot_conflict_or(e, "insert session"))?;

        Ok(session.clone())
    }

    /// Writes the full mutable state of a session while its stored status
    /// is still `expected`.
    async fn write(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
        reschedule_reason: Option<&str>,
        action: &str,
    ) -> Result<(), DomainError> {
        let display = session.mentor_display();
        let meeting = session.meeting();
        let result = sqlx::query(
            r#"
            UPDATE mentoring_sessions SET
                scheduled_at = $2,
                timezone = $3,
                duration_minutes = $4,
                notes = $5,
                status = $6,
                mentor_name = $7,
                mentor_avatar = $8,
                display_info_complete = $9,
                meeting_link = $10,
                meeting_id = $11,
                last_reschedule_reason = COALESCE($12, last_reschedule_reason),
                updated_at = $13
            WHERE id = $1 AND status = $14
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.scheduled_at().as_datetime())
        .bind(session.timezone().name())
        .bind(session.duration_minutes() as i32)
        .bind(session.notes())
        .bind(session.status().as_str())
        .bind(display.name.as_deref())
        .bind(display.avatar.as_deref())
        .bind(session.display_info_complete())
        .bind(meeting.and_then(|m| m.meeting_link.as_deref()))
        .bind(meeting.and_then(|m| m.meeting_id.as_deref()))
        .bind(reschedule_reason)
        .bind(session.updated_at().as_datetime())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| slot_conflict_or(e, action))?;

        if result.rows_affected() == 0 {
            return Err(self.missed_write(session.id()).await);
        }

        Ok(())
    }

    /// Explains a conditional write that matched no row.
    async fn missed_write(&self, id: &SessionId) -> DomainError {
        let status: Result<Option<String>, sqlx::Error> =
            sqlx::query_scalar::<_, String>("SELECT status FROM mentoring_sessions WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await;
        match status {
            Ok(Some(current)) => {
                DomainError::state_conflict("status", format!("session is {}", current))
            }
            Ok(None) => not_found(id),
            Err(e) => query_failed("fetch session status", e),
        }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(&self, session: &MentoringSession) -> Result<MentoringSession, DomainError> {
        self.insert(session, None).await
    }

    async fn create_for_user_by_admin(
        &self,
        session: &MentoringSession,
        admin: &UserId,
    ) -> Result<MentoringSession, DomainError> {
        self.insert(session, Some(admin)).await
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_SESSION))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MentoringSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 ORDER BY scheduled_at ASC",
            SELECT_SESSION
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_failed("fetch sessions by user", e))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn confirm(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.write(session, expected, None, "confirm session").await
    }

    async fn reschedule(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        self.write(session, expected, reason, "reschedule session").await
    }

    async fn cancel(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.write(session, expected, None, "cancel session").await
    }

    async fn update(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.write(session, expected, None, "update session").await
    }

    async fn refresh_display(&self, id: &SessionId, display: &MentorDisplay) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentoring_sessions SET
                mentor_name = $2,
                mentor_avatar = $3,
                display_info_complete = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(display.name.as_deref())
        .bind(display.avatar.as_deref())
        .bind(display.is_complete())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("refresh mentor display", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("id", id.to_string())
}

fn slot_conflict_or(e: sqlx::Error, action: &str) -> DomainError {
    if is_unique_violation(&e) {
        return DomainError::validation(
            FIELD_SCHEDULED_AT,
            "the mentor already has a session at this time",
        );
    }
    query_failed(action, e)
}

fn row_to_session(row: &PgRow) -> Result<MentoringSession, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let mentor_id: uuid::Uuid = column(row, "mentor_id")?;
    let user_id: String = column(row, "user_id")?;
    let scheduled_at: chrono::DateTime<chrono::Utc> = column(row, "scheduled_at")?;
    let timezone: String = column(row, "timezone")?;
    let duration: i32 = column(row, "duration_minutes")?;
    let status: String = column(row, "status")?;
    let meeting = MeetingInfo::new(column(row, "meeting_link")?, column(row, "meeting_id")?);
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(MentoringSession::reconstitute(
        SessionId::from_uuid(id),
        MentorId::from_uuid(mentor_id),
        UserId::new(user_id).map_err(|e| corrupt("user_id", e))?,
        Timestamp::from_datetime(scheduled_at),
        CivilZone::parse("timezone", &timezone).map_err(|e| corrupt("timezone", e))?,
        u32::try_from(duration).map_err(|e| corrupt("duration_minutes", e))?,
        column(row, "topic")?,
        column(row, "notes")?,
        status
            .parse::<SessionStatus>()
            .map_err(|e| corrupt("status", e))?,
        MentorDisplay::new(column(row, "mentor_name")?, column(row, "mentor_avatar")?),
        column(row, "display_info_complete")?,
        (!meeting.is_empty()).then_some(meeting),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
