//! DeleteAvailabilityHandler - Command handler for removing a window.

use std::sync::Arc;

use crate::domain::foundation::{AvailabilityId, CommandMetadata, MentorId};
use crate::domain::scheduling::SchedulingError;
use crate::ports::AvailabilityStore;

/// Command to remove an availability window.
#[derive(Debug, Clone)]
pub struct DeleteAvailabilityCommand {
    pub mentor_id: MentorId,
    pub window_id: AvailabilityId,
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAvailabilityResult {
    /// False when the window was already absent.
    pub removed: bool,
}

/// Handler for deleting availability windows.
///
/// Deleting an absent window succeeds. Windows of other mentors are never
/// touched and are treated as absent.
pub struct DeleteAvailabilityHandler {
    store: Arc<dyn AvailabilityStore>,
}

impl DeleteAvailabilityHandler {
    pub fn new(store: Arc<dyn AvailabilityStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteAvailabilityCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteAvailabilityResult, SchedulingError> {
        let removed = self.store.delete(&cmd.mentor_id, &cmd.window_id).await?;

        tracing::info!(
            mentor_id = %cmd.mentor_id,
            window_id = %cmd.window_id,
            removed,
            correlation_id = %metadata.correlation_id(),
            "availability window deleted"
        );
        Ok(DeleteAvailabilityResult { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    #[tokio::test]
    async fn removes_owned_window() {
        let mentor_id = MentorId::new();
        let existing = window(mentor_id, 2, "09:00", "10:00");
        let store = Arc::new(MockAvailability::with(vec![existing.clone()]));
        let handler = DeleteAvailabilityHandler::new(store.clone());

        let result = handler
            .handle(
                DeleteAvailabilityCommand {
                    mentor_id,
                    window_id: *existing.id(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert!(result.removed);
        assert!(store.windows().is_empty());
    }

    #[tokio::test]
    async fn deleting_twice_is_idempotent() {
        let mentor_id = MentorId::new();
        let existing = window(mentor_id, 2, "09:00", "10:00");
        let handler = DeleteAvailabilityHandler::new(Arc::new(MockAvailability::with(vec![existing.clone()])));
        let cmd = DeleteAvailabilityCommand {
            mentor_id,
            window_id: *existing.id(),
        };

        handler.handle(cmd.clone(), metadata()).await.unwrap();
        let second = handler.handle(cmd, metadata()).await.unwrap();

        assert!(!second.removed);
    }

    #[tokio::test]
    async fn other_mentors_window_is_left_alone() {
        let existing = window(MentorId::new(), 2, "09:00", "10:00");
        let store = Arc::new(MockAvailability::with(vec![existing.clone()]));
        let handler = DeleteAvailabilityHandler::new(store.clone());

        let result = handler
            .handle(
                DeleteAvailabilityCommand {
                    mentor_id: MentorId::new(),
                    window_id: *existing.id(),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert!(!result.removed);
        assert_eq!(store.windows().len(), 1);
    }
}
