//! Session HTTP adapter.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::SessionHandlers;
pub use routes::{admin_session_routes, session_routes};
