//! In-memory adapters.
//!
//! Used by the binary when no database is configured, and by tests.

mod availability_store;
mod mentor_directory;
mod session_store;

pub use availability_store::InMemoryAvailabilityStore;
pub use mentor_directory::InMemoryMentorDirectory;
pub use session_store::{InMemorySessionStore, RescheduleRecord};
