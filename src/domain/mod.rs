//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `availability` - Weekly mentor availability windows and their validation
//! - `scheduling` - Booking time resolution and the scheduling error taxonomy
//! - `session` - Mentoring session lifecycle
pub mod availability;
pub mod foundation;
pub mod scheduling;
pub mod session;
