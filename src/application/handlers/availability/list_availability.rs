//! ListAvailabilityHandler - Query handler for a mentor's windows.

use std::sync::Arc;

use crate::domain::availability::AvailabilityWindow;
use crate::domain::foundation::MentorId;
use crate::domain::scheduling::SchedulingError;
use crate::ports::AvailabilityStore;

/// Query for all windows of a mentor.
#[derive(Debug, Clone)]
pub struct ListAvailabilityQuery {
    pub mentor_id: MentorId,
    /// Drop inactive windows from the result.
    pub active_only: bool,
}

/// Handler for listing availability windows.
pub struct ListAvailabilityHandler {
    store: Arc<dyn AvailabilityStore>,
}

impl ListAvailabilityHandler {
    pub fn new(store: Arc<dyn AvailabilityStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListAvailabilityQuery,
    ) -> Result<Vec<AvailabilityWindow>, SchedulingError> {
        let mut windows = self.store.find_by_mentor(&query.mentor_id).await?;
        if query.active_only {
            windows.retain(AvailabilityWindow::is_active);
        }
        Ok(windows)
    }
}
