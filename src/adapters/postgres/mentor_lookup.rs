//! PostgreSQL implementation of MentorLookup.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, MentorId};
use crate::ports::{Mentor, MentorLookup};

use super::support::{column, query_failed};

/// Reads mentor profiles from the shared `mentors` table.
#[derive(Clone)]
pub struct PostgresMentorLookup {
    pool: PgPool,
}

impl PostgresMentorLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentorLookup for PostgresMentorLookup {
    async fn find_by_id(&self, id: &MentorId) -> Result<Option<Mentor>, DomainError> {
        let row = sqlx::query("SELECT id, name, avatar_url FROM mentors WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("fetch mentor", e))?;

        match row {
            Some(row) => {
                let id: uuid::Uuid = column(&row, "id")?;
                Ok(Some(Mentor {
                    id: MentorId::from_uuid(id),
                    name: column(&row, "name")?,
                    avatar: column(&row, "avatar_url")?,
                }))
            }
            None => Ok(None),
        }
    }
}
