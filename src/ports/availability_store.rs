//! Availability store port.
//!
//! Persistence for mentor availability windows. Windows are always addressed
//! within their owning mentor's collection.

use async_trait::async_trait;

use crate::domain::availability::AvailabilityWindow;
use crate::domain::foundation::{AvailabilityId, DomainError, MentorId};

/// Repository port for availability windows.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// All windows of a mentor, active and inactive, in no guaranteed order.
    async fn find_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<AvailabilityWindow>, DomainError>;

    /// Find a window by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AvailabilityId) -> Result<Option<AvailabilityWindow>, DomainError>;

    /// Persist a new window and return it as stored.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, DomainError>;

    /// Overwrite an existing window.
    ///
    /// # Errors
    ///
    /// - `AvailabilityNotFound` if the window doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError>;

    /// Remove a window owned by `mentor_id`.
    ///
    /// Returns `false` when nothing was removed. Never fails for absent windows.
    async fn delete(&self, mentor_id: &MentorId, id: &AvailabilityId) -> Result<bool, DomainError>;
}
