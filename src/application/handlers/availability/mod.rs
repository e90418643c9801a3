//! Availability command and query handlers.

mod create_availability;
mod delete_availability;
mod list_availability;
mod update_availability;

pub use create_availability::{CreateAvailabilityCommand, CreateAvailabilityHandler};
pub use delete_availability::{
    DeleteAvailabilityCommand, DeleteAvailabilityHandler, DeleteAvailabilityResult,
};
pub use list_availability::{ListAvailabilityHandler, ListAvailabilityQuery};
pub use update_availability::{UpdateAvailabilityCommand, UpdateAvailabilityHandler};
