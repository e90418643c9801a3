//! Availability HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::AvailabilityHandlers;
pub use routes::availability_routes;
