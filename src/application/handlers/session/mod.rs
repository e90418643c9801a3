//! Session command and query handlers.

mod cancel_session;
mod confirm_session;
mod create_session;
mod display_repair;
mod get_session;
mod list_user_sessions;
mod reschedule_session;
mod update_session;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler};
pub use confirm_session::{ConfirmSessionCommand, ConfirmSessionHandler};
pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use display_repair::MentorDisplayRepair;
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_user_sessions::{ListUserSessionsHandler, ListUserSessionsQuery};
pub use reschedule_session::{RescheduleSessionCommand, RescheduleSessionHandler};
pub use update_session::{UpdateSessionCommand, UpdateSessionHandler};
