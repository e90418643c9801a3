//! PostgreSQL implementation of AvailabilityStore.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::availability::{AvailabilityWindow, CivilZone, IsoWeekday, TimeOfDay};
use crate::domain::foundation::{AvailabilityId, DomainError, ErrorCode, MentorId, Timestamp};
use crate::ports::AvailabilityStore;

use super::support::{column, corrupt, query_failed};

const SELECT_WINDOW: &str = r#"
    SELECT id, mentor_id, day_of_week, start_time, end_time, timezone,
           is_active, created_at, updated_at
    FROM availability_windows
"#;

/// PostgreSQL implementation of AvailabilityStore.
#[derive(Clone)]
pub struct PostgresAvailabilityStore {
    pool: PgPool,
}

impl PostgresAvailabilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PostgresAvailabilityStore {
    async fn find_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<AvailabilityWindow>, DomainError> {
        let rows = sqlx::query(&format!("{} WHERE mentor_id = $1", SELECT_WINDOW))
            .bind(mentor_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("fetch availability windows", e))?;

        rows.iter().map(row_to_window).collect()
    }

    async fn find_by_id(&self, id: &AvailabilityId) -> Result<Option<AvailabilityWindow>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_WINDOW))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch availability window", e))?;

        row.as_ref().map(row_to_window).transpose()
    }

    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO availability_windows (
                id, mentor_id, day_of_week, start_time, end_time, timezone,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(window.id().as_uuid())
        .bind(window.mentor_id().as_uuid())
        .bind(i16::from(window.day_of_week().value()))
        .bind(window.start_time().to_naive())
        .bind(window.end_time().to_naive())
        .bind(window.timezone().name())
        .bind(window.is_active())
        .bind(window.created_at().as_datetime())
        .bind(window.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("insert availability window", e))?;

        Ok(window.clone())
    }

    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE availability_windows SET
                day_of_week = $2,
                start_time = $3,
                end_time = $4,
                timezone = $5,
                is_active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(window.id().as_uuid())
        .bind(i16::from(window.day_of_week().value()))
        .bind(window.start_time().to_naive())
        .bind(window.end_time().to_naive())
        .bind(window.timezone().name())
        .bind(window.is_active())
        .bind(window.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("update availability window", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", window.id()),
            )
            .with_detail("id", window.id().to_string()));
        }

        Ok(())
    }

    async fn delete(&self, mentor_id: &MentorId, id: &AvailabilityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM availability_windows WHERE id = $1 AND mentor_id = $2")
            .bind(id.as_uuid())
            .bind(mentor_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("delete availability window", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_window(row: &PgRow) -> Result<AvailabilityWindow, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let mentor_id: uuid::Uuid = column(row, "mentor_id")?;
    let day: i16 = column(row, "day_of_week")?;
    let start: NaiveTime = column(row, "start_time")?;
    let end: NaiveTime = column(row, "end_time")?;
    let timezone: String = column(row, "timezone")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let day_of_week = u8::try_from(day)
        .map_err(|e| corrupt("day_of_week", e))
        .and_then(|d| IsoWeekday::new(d).map_err(|e| corrupt("day_of_week", e)))?;

    Ok(AvailabilityWindow::reconstitute(
        AvailabilityId::from_uuid(id),
        MentorId::from_uuid(mentor_id),
        day_of_week,
        TimeOfDay::from_naive(start),
        TimeOfDay::from_naive(end),
        CivilZone::parse("timezone", &timezone).map_err(|e| corrupt("timezone", e))?,
        column(row, "is_active")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
