//! Availability domain module.
//!
//! Recurring weekly availability windows of mentors, the civil time and
//! weekday value objects they are expressed in, and the checker functions
//! validating raw window input.

mod time_of_day;
mod validation;
mod weekday;
mod window;
mod zone;

pub use time_of_day::TimeOfDay;
pub use validation::{
    validate_patch, validate_request_weekday, validate_time, validate_window,
    validate_window_order, AvailabilityPatch, ValidWindow, WindowInput, WindowPatchInput,
    FIELD_DAY_OF_WEEK, FIELD_END_TIME, FIELD_START_TIME, FIELD_TIMEZONE,
};
pub use weekday::{iso_from_sunday_first, sunday_first_from_iso, IsoWeekday, SundayFirstWeekday};
pub use window::AvailabilityWindow;
pub use zone::{AmbiguousTimePolicy, CivilZone, DEFAULT_TIMEZONE};
