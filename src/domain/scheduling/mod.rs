//! Scheduling domain module.
//!
//! Booking time resolution against mentor availability, and the error
//! taxonomy shared by all scheduling use cases.

mod errors;
mod resolver;

pub use errors::{EntityKind, SchedulingError, REQUEST_FIELD, UNAVAILABLE_MESSAGE};
pub use resolver::{
    BookingTime, BookingTimeInput, ResolvedSlot, SchedulingResolver, FIELD_DATE,
    FIELD_SCHEDULED_AT, FIELD_TIME, NO_MATCHING_AVAILABILITY,
};
