//! In-memory mentor directory.
//!
//! Stands in for the external profile service in development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MentorId};
use crate::ports::{Mentor, MentorLookup};

/// In-memory implementation of `MentorLookup`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMentorDirectory {
    mentors: Arc<RwLock<HashMap<MentorId, Mentor>>>,
}

impl InMemoryMentorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a mentor profile.
    pub async fn upsert(&self, mentor: Mentor) {
        self.mentors.write().await.insert(mentor.id, mentor);
    }

    pub async fn remove(&self, id: &MentorId) {
        self.mentors.write().await.remove(id);
    }
}

#[async_trait]
impl MentorLookup for InMemoryMentorDirectory {
    async fn find_by_id(&self, id: &MentorId) -> Result<Option<Mentor>, DomainError> {
        Ok(self.mentors.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_then_find() {
        let directory = InMemoryMentorDirectory::new();
        let mentor = Mentor {
            id: MentorId::new(),
            name: "Ana".to_string(),
            avatar: None,
        };
        directory.upsert(mentor.clone()).await;

        assert_eq!(directory.find_by_id(&mentor.id).await.unwrap(), Some(mentor.clone()));

        directory.remove(&mentor.id).await;
        assert_eq!(directory.find_by_id(&mentor.id).await.unwrap(), None);
    }
}
