//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler returns `SchedulingError`; port failures are translated on `?`.

pub mod availability;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use availability::{
    CreateAvailabilityCommand, CreateAvailabilityHandler, DeleteAvailabilityCommand,
    DeleteAvailabilityHandler, DeleteAvailabilityResult, ListAvailabilityHandler,
    ListAvailabilityQuery, UpdateAvailabilityCommand, UpdateAvailabilityHandler,
};
pub use session::{
    CancelSessionCommand, CancelSessionHandler, ConfirmSessionCommand, ConfirmSessionHandler,
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    ListUserSessionsHandler, ListUserSessionsQuery, MentorDisplayRepair,
    RescheduleSessionCommand, RescheduleSessionHandler, UpdateSessionCommand,
    UpdateSessionHandler,
};
