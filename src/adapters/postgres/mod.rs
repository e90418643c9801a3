//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresMentorLookup` - Reads the shared `mentors` table
//! - `PostgresAvailabilityStore` - Availability windows
//! - `PostgresSessionStore` - Mentoring sessions
//!
//! Schema lives in `migrations/`.

mod availability_store;
mod mentor_lookup;
mod session_store;
mod support;

pub use availability_store::PostgresAvailabilityStore;
pub use mentor_lookup::PostgresMentorLookup;
pub use session_store::PostgresSessionStore;
