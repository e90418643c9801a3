//! In-memory availability store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::availability::AvailabilityWindow;
use crate::domain::foundation::{AvailabilityId, DomainError, ErrorCode, MentorId};
use crate::ports::AvailabilityStore;

/// In-memory implementation of `AvailabilityStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityStore {
    windows: Arc<RwLock<HashMap<AvailabilityId, AvailabilityWindow>>>,
}

impl InMemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored windows across all mentors.
    pub async fn len(&self) -> usize {
        self.windows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.read().await.is_empty()
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailabilityStore {
    async fn find_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<AvailabilityWindow>, DomainError> {
        let windows = self.windows.read().await;
        Ok(windows
            .values()
            .filter(|w| w.belongs_to(mentor_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &AvailabilityId) -> Result<Option<AvailabilityWindow>, DomainError> {
        Ok(self.windows.read().await.get(id).cloned())
    }

    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, DomainError> {
        self.windows
            .write()
            .await
            .insert(*window.id(), window.clone());
        Ok(window.clone())
    }

    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        let mut windows = self.windows.write().await;
        match windows.get_mut(window.id()) {
            Some(existing) => {
                *existing = window.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", window.id()),
            )
            .with_detail("id", window.id().to_string())),
        }
    }

    async fn delete(&self, mentor_id: &MentorId, id: &AvailabilityId) -> Result<bool, DomainError> {
        let mut windows = self.windows.write().await;
        let owned = windows.get(id).is_some_and(|w| w.belongs_to(mentor_id));
        if owned {
            windows.remove(id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::{validate_window, CivilZone, WindowInput};

    fn window(mentor_id: MentorId) -> AvailabilityWindow {
        let fields = validate_window(
            &WindowInput {
                day_of_week: 1,
                start_time: "09:00".into(),
                end_time: "12:00".into(),
                timezone: None,
                is_active: None,
            },
            CivilZone::default(),
        )
        .unwrap();
        AvailabilityWindow::new(mentor_id, fields)
    }

    #[tokio::test]
    async fn windows_are_scoped_by_mentor() {
        let store = InMemoryAvailabilityStore::new();
        let (ana, bia) = (MentorId::new(), MentorId::new());
        store.create(&window(ana)).await.unwrap();
        store.create(&window(ana)).await.unwrap();
        store.create(&window(bia)).await.unwrap();

        assert_eq!(store.find_by_mentor(&ana).await.unwrap().len(), 2);
        assert_eq!(store.find_by_mentor(&bia).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_window_is_not_found() {
        let store = InMemoryAvailabilityStore::new();
        let err = store.update(&window(MentorId::new())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AvailabilityNotFound);
    }

    #[tokio::test]
    async fn delete_requires_ownership_and_is_idempotent() {
        let store = InMemoryAvailabilityStore::new();
        let ana = MentorId::new();
        let w = window(ana);
        store.create(&w).await.unwrap();

        assert!(!store.delete(&MentorId::new(), w.id()).await.unwrap());
        assert!(store.delete(&ana, w.id()).await.unwrap());
        assert!(!store.delete(&ana, w.id()).await.unwrap());
        assert!(store.is_empty().await);
    }
}
