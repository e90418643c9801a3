//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process stores, used without a database and in tests
//! - `postgres` - PostgreSQL stores via sqlx
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAvailabilityStore, InMemoryMentorDirectory, InMemorySessionStore};
pub use postgres::{PostgresAvailabilityStore, PostgresMentorLookup, PostgresSessionStore};
