//! UpdateAvailabilityHandler - Command handler for partial window updates.

use std::sync::Arc;

use crate::domain::availability::{validate_patch, AvailabilityWindow, WindowPatchInput};
use crate::domain::foundation::{AvailabilityId, CommandMetadata, MentorId};
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::ports::AvailabilityStore;

/// Command to patch an availability window.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityCommand {
    pub mentor_id: MentorId,
    pub window_id: AvailabilityId,
    pub patch: WindowPatchInput,
}

/// Handler for updating availability windows.
pub struct UpdateAvailabilityHandler {
    store: Arc<dyn AvailabilityStore>,
}

impl UpdateAvailabilityHandler {
    pub fn new(store: Arc<dyn AvailabilityStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAvailabilityCommand,
        metadata: CommandMetadata,
    ) -> Result<AvailabilityWindow, SchedulingError> {
        let patch = validate_patch(&cmd.patch)?;

        // A window of another mentor is reported exactly like a missing one.
        let mut window = self
            .store
            .find_by_id(&cmd.window_id)
            .await?
            .filter(|w| w.belongs_to(&cmd.mentor_id))
            .ok_or_else(|| SchedulingError::not_found(EntityKind::AvailabilityWindow, cmd.window_id))?;

        if patch.is_empty() {
            return Ok(window);
        }

        window.apply_patch(&patch)?;
        self.store.update(&window).await?;

        tracing::info!(
            mentor_id = %cmd.mentor_id,
            window_id = %cmd.window_id,
            correlation_id = %metadata.correlation_id(),
            "availability window updated"
        );
        Ok(window)
    }
}
