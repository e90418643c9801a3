//! CreateAvailabilityHandler - Command handler for adding a weekly window.

use std::sync::Arc;

use crate::application::SchedulingSettings;
use crate::domain::availability::{validate_window, AvailabilityWindow, WindowInput};
use crate::domain::foundation::{CommandMetadata, MentorId};
use crate::domain::scheduling::{EntityKind, SchedulingError};
use crate::ports::{AvailabilityStore, MentorLookup};

/// Command to add an availability window to a mentor.
#[derive(Debug, Clone)]
pub struct CreateAvailabilityCommand {
    pub mentor_id: MentorId,
    pub window: WindowInput,
}

/// Handler for creating availability windows.
///
/// Overlapping windows are accepted; the resolver treats them as a union.
pub struct CreateAvailabilityHandler {
    mentors: Arc<dyn MentorLookup>,
    store: Arc<dyn AvailabilityStore>,
    settings: SchedulingSettings,
}

impl CreateAvailabilityHandler {
    pub fn new(
        mentors: Arc<dyn MentorLookup>,
        store: Arc<dyn AvailabilityStore>,
        settings: SchedulingSettings,
    ) -> Self {
        Self {
            mentors,
            store,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAvailabilityCommand,
        metadata: CommandMetadata,
    ) -> Result<AvailabilityWindow, SchedulingError> {
        let fields = validate_window(&cmd.window, self.settings.default_zone)?;

        self.mentors
            .find_by_id(&cmd.mentor_id)
            .await?
            .ok_or_else(|| SchedulingError::not_found(EntityKind::Mentor, cmd.mentor_id))?;

        let window = AvailabilityWindow::new(cmd.mentor_id, fields);
        let stored = self.store.create(&window).await?;

        tracing::info!(
            mentor_id = %stored.mentor_id(),
            window_id = %stored.id(),
            day_of_week = stored.day_of_week().value(),
            correlation_id = %metadata.correlation_id(),
            "availability window created"
        );
        Ok(stored)
    }
}
