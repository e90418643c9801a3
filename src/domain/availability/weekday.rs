//! Weekday encodings.
//!
//! Two numberings coexist on purpose:
//!
//! | Day       | `SundayFirstWeekday` (DTO) | `IsoWeekday` (entity) |
//! |-----------|----------------------------|-----------------------|
//! | Sunday    | 0                          | 7                     |
//! | Monday    | 1                          | 1                     |
//! | Saturday  | 6                          | 6                     |
//!
//! Request and response bodies speak Sunday-first; stored windows speak ISO.
//! Crossing between them goes through [`iso_from_sunday_first`] and
//! [`sunday_first_from_iso`] only.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// ISO-8601 weekday number, 1 = Monday ... 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IsoWeekday(u8);

impl IsoWeekday {
    pub const MONDAY: IsoWeekday = IsoWeekday(1);
    pub const SUNDAY: IsoWeekday = IsoWeekday(7);

    /// Validates an ISO weekday number (1-7).
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(1..=7).contains(&value) {
            return Err(ValidationError::out_of_range("dayOfWeek", 1, 7, value.into()));
        }
        Ok(Self(value))
    }

    /// Weekday of a calendar date.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::from_chrono(date.weekday())
    }

    pub fn from_chrono(weekday: Weekday) -> Self {
        // number_from_monday() is 1..=7 by construction.
        Self(weekday.number_from_monday() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for IsoWeekday {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        IsoWeekday::new(value)
    }
}

impl From<IsoWeekday> for u8 {
    fn from(day: IsoWeekday) -> Self {
        day.0
    }
}

impl fmt::Display for IsoWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            _ => "Sunday",
        };
        write!(f, "{}", name)
    }
}

/// Human-facing weekday number, 0 = Sunday ... 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SundayFirstWeekday(u8);

impl SundayFirstWeekday {
    /// Validates a Sunday-first weekday number (0-6).
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > 6 {
            return Err(ValidationError::out_of_range("dayOfWeek", 0, 6, value.into()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SundayFirstWeekday {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SundayFirstWeekday::new(value)
    }
}

impl From<SundayFirstWeekday> for u8 {
    fn from(day: SundayFirstWeekday) -> Self {
        day.0
    }
}

/// Converts a request weekday (0 = Sunday) to the stored ISO weekday (7 = Sunday).
pub fn iso_from_sunday_first(day: SundayFirstWeekday) -> IsoWeekday {
    match day.0 {
        0 => IsoWeekday::SUNDAY,
        n => IsoWeekday(n),
    }
}

/// Converts a stored ISO weekday (7 = Sunday) back to the request form (0 = Sunday).
pub fn sunday_first_from_iso(day: IsoWeekday) -> SundayFirstWeekday {
    match day.0 {
        7 => SundayFirstWeekday(0),
        n => SundayFirstWeekday(n),
    }
}
