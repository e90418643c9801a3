//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MentorLookup` - Mentor existence and display data
//! - `AvailabilityStore` - Persistence of weekly availability windows
//! - `SessionStore` - Persistence of mentoring sessions and their transitions

mod availability_store;
mod mentor_lookup;
mod session_store;

pub use availability_store::AvailabilityStore;
pub use mentor_lookup::{Mentor, MentorLookup};
pub use session_store::SessionStore;
