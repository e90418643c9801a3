//! Time window validation.
//!
//! Checker functions turning raw request values into typed window parts.
//! Each returns the first violation found, scoped to the field that caused it.

use crate::domain::foundation::ValidationError;

use super::time_of_day::TimeOfDay;
use super::weekday::{iso_from_sunday_first, IsoWeekday, SundayFirstWeekday};
use super::zone::CivilZone;

pub const FIELD_DAY_OF_WEEK: &str = "dayOfWeek";
pub const FIELD_START_TIME: &str = "startTime";
pub const FIELD_END_TIME: &str = "endTime";
pub const FIELD_TIMEZONE: &str = "timezone";

/// Raw window fields as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInput {
    /// Sunday-first weekday (0 = Sunday).
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    pub timezone: Option<String>,
    pub is_active: Option<bool>,
}

/// Raw partial update; only supplied fields are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowPatchInput {
    /// Sunday-first weekday (0 = Sunday).
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub timezone: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated fields of a window about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidWindow {
    pub day_of_week: IsoWeekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub timezone: CivilZone,
    pub is_active: bool,
}

/// Validated partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailabilityPatch {
    pub day_of_week: Option<IsoWeekday>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub timezone: Option<CivilZone>,
    pub is_active: Option<bool>,
}

impl AvailabilityPatch {
    pub fn is_empty(&self) -> bool {
        *self == AvailabilityPatch::default()
    }

    /// True when the patch moves either boundary of the window.
    pub fn touches_bounds(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }
}

/// Accepts only `HH:mm` with `HH` 00-23 and `mm` 00-59.
pub fn validate_time(field: &str, raw: &str) -> Result<TimeOfDay, ValidationError> {
    TimeOfDay::parse(field, raw)
}

/// Accepts a Sunday-first weekday (0-6) and returns the stored ISO weekday.
pub fn validate_request_weekday(raw: i64) -> Result<IsoWeekday, ValidationError> {
    let day = u8::try_from(raw)
        .ok()
        .and_then(|n| SundayFirstWeekday::new(n).ok())
        .ok_or_else(|| ValidationError::out_of_range(FIELD_DAY_OF_WEEK, 0, 6, raw))?;
    Ok(iso_from_sunday_first(day))
}

/// Requires `end` to be strictly after `start` on the same day.
pub fn validate_window_order(start: TimeOfDay, end: TimeOfDay) -> Result<(), ValidationError> {
    if end.minutes_since_midnight() <= start.minutes_since_midnight() {
        return Err(ValidationError::invalid(
            FIELD_END_TIME,
            format!("{} must be after startTime {}", end, start),
        ));
    }
    Ok(())
}

/// Validates a full window, applying the zone default and `is_active = true`.
pub fn validate_window(
    input: &WindowInput,
    default_zone: CivilZone,
) -> Result<ValidWindow, ValidationError> {
    let day_of_week = validate_request_weekday(input.day_of_week)?;
    let start_time = validate_time(FIELD_START_TIME, &input.start_time)?;
    let end_time = validate_time(FIELD_END_TIME, &input.end_time)?;
    validate_window_order(start_time, end_time)?;
    let timezone = CivilZone::parse_or(FIELD_TIMEZONE, input.timezone.as_deref(), default_zone)?;

    Ok(ValidWindow {
        day_of_week,
        start_time,
        end_time,
        timezone,
        is_active: input.is_active.unwrap_or(true),
    })
}

/// Validates the supplied fields of a partial update.
///
/// Ordering is checked later, once the patch is merged with the stored window.
pub fn validate_patch(input: &WindowPatchInput) -> Result<AvailabilityPatch, ValidationError> {
    Ok(AvailabilityPatch {
        day_of_week: input.day_of_week.map(validate_request_weekday).transpose()?,
        start_time: input
            .start_time
            .as_deref()
            .map(|raw| validate_time(FIELD_START_TIME, raw))
            .transpose()?,
        end_time: input
            .end_time
            .as_deref()
            .map(|raw| validate_time(FIELD_END_TIME, raw))
            .transpose()?,
        timezone: input
            .timezone
            .as_deref()
            .map(|raw| CivilZone::parse(FIELD_TIMEZONE, raw))
            .transpose()?,
        is_active: input.is_active,
    })
}
