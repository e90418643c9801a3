//! Scheduling resolver.
//!
//! Turns a booking request into a canonical UTC instant and checks it against
//! a mentor's recurring availability.
//!
//! # Input shapes
//!
//! - civil `date` + `time` in a `timezone` (default applied when omitted),
//!   converted to UTC with the zone's offset rules at that date;
//! - an ISO-8601 `scheduledAt` instant plus a mandatory `timezone`, kept only
//!   for display.
//!
//! When both are supplied `scheduledAt` wins.
//!
//! # Concurrency
//!
//! Matching is done against the windows known at call time and reserves
//! nothing. Two bookings for the same instant can both pass; preventing that
//! is up to the session store.

use chrono::NaiveDate;

use crate::domain::availability::{
    AmbiguousTimePolicy, AvailabilityWindow, CivilZone, TimeOfDay, FIELD_TIMEZONE,
};
use crate::domain::foundation::{Timestamp, ValidationError};

pub const FIELD_DATE: &str = "date";
pub const FIELD_TIME: &str = "time";
pub const FIELD_SCHEDULED_AT: &str = "scheduledAt";

/// Message used when no window matches a booking instant.
pub const NO_MATCHING_AVAILABILITY: &str = "no matching availability";

/// Raw booking time fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingTimeInput {
    pub date: Option<String>,
    pub time: Option<String>,
    pub scheduled_at: Option<String>,
    pub timezone: Option<String>,
}

/// A booking time in one of the two accepted shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTime {
    /// Wall-clock date and time in `timezone`.
    Civil {
        date: NaiveDate,
        time: TimeOfDay,
        timezone: CivilZone,
    },
    /// Precomputed instant; `timezone` is display-only.
    Instant {
        scheduled_at: Timestamp,
        timezone: CivilZone,
    },
}

impl BookingTime {
    /// Picks and validates the input shape.
    pub fn from_input(
        input: &BookingTimeInput,
        default_zone: CivilZone,
    ) -> Result<Self, ValidationError> {
        if let Some(raw) = input.scheduled_at.as_deref() {
            let scheduled_at = Timestamp::parse_iso(FIELD_SCHEDULED_AT, raw)?;
            let zone_name = input
                .timezone
                .as_deref()
                .ok_or_else(|| ValidationError::empty_field(FIELD_TIMEZONE))?;
            let timezone = CivilZone::parse(FIELD_TIMEZONE, zone_name)?;
            return Ok(BookingTime::Instant {
                scheduled_at,
                timezone,
            });
        }

        let raw_date = input
            .date
            .as_deref()
            .ok_or_else(|| ValidationError::empty_field(FIELD_DATE))?;
        let raw_time = input
            .time
            .as_deref()
            .ok_or_else(|| ValidationError::empty_field(FIELD_TIME))?;

        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::invalid_format(FIELD_DATE, "expected YYYY-MM-DD"))?;
        let time = TimeOfDay::parse(FIELD_TIME, raw_time)?;
        let timezone = CivilZone::parse_or(FIELD_TIMEZONE, input.timezone.as_deref(), default_zone)?;

        Ok(BookingTime::Civil {
            date,
            time,
            timezone,
        })
    }

    pub fn timezone(&self) -> CivilZone {
        match self {
            BookingTime::Civil { timezone, .. } | BookingTime::Instant { timezone, .. } => {
                *timezone
            }
        }
    }
}

/// Canonical result of resolving a booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    /// Start of the session, UTC.
    pub scheduled_at: Timestamp,
    /// Zone the participants reasoned in.
    pub timezone: CivilZone,
}

/// Converts booking times to UTC and matches them against availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingResolver {
    ambiguous_time: AmbiguousTimePolicy,
}

impl SchedulingResolver {
    pub fn new(ambiguous_time: AmbiguousTimePolicy) -> Self {
        Self { ambiguous_time }
    }

    pub fn ambiguous_time_policy(&self) -> AmbiguousTimePolicy {
        self.ambiguous_time
    }

    /// Produces the canonical UTC instant for a booking time.
    pub fn resolve(&self, booking: &BookingTime) -> ResolvedSlot {
        match *booking {
            BookingTime::Instant {
                scheduled_at,
                timezone,
            } => ResolvedSlot {
                scheduled_at,
                timezone,
            },
            BookingTime::Civil {
                date,
                time,
                timezone,
            } => {
                let local = date.and_time(time.to_naive());
                let scheduled_at = timezone.resolve_local(local, self.ambiguous_time);
                tracing::debug!(
                    local = %local,
                    timezone = %timezone,
                    scheduled_at = %scheduled_at.to_iso_string(),
                    "resolved civil booking time"
                );
                ResolvedSlot {
                    scheduled_at,
                    timezone,
                }
            }
        }
    }

    /// Finds an active window covering `instant`.
    ///
    /// Each window is checked on its own zone's wall clock.
    pub fn find_matching_window<'a>(
        &self,
        instant: &Timestamp,
        windows: &'a [AvailabilityWindow],
    ) -> Option<&'a AvailabilityWindow> {
        windows.iter().find(|window| window.covers(instant))
    }

    /// Fails with a `scheduledAt` validation error unless a window covers `instant`.
    pub fn ensure_available(
        &self,
        instant: &Timestamp,
        windows: &[AvailabilityWindow],
    ) -> Result<(), ValidationError> {
        match self.find_matching_window(instant, windows) {
            Some(window) => {
                tracing::debug!(
                    window_id = %window.id(),
                    scheduled_at = %instant.to_iso_string(),
                    "booking matches availability window"
                );
                Ok(())
            }
            None => Err(ValidationError::invalid(
                FIELD_SCHEDULED_AT,
                NO_MATCHING_AVAILABILITY,
            )),
        }
    }

    /// Resolves a booking time and checks it against `windows`.
    pub fn resolve_available(
        &self,
        booking: &BookingTime,
        windows: &[AvailabilityWindow],
    ) -> Result<ResolvedSlot, ValidationError> {
        let slot = self.resolve(booking);
        self.ensure_available(&slot.scheduled_at, windows)?;
        Ok(slot)
    }
}
