//! Civil time-of-day with minute precision.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day (`HH:mm`), independent of any timezone.
///
/// Ordering is by minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Builds a time from hour and minute components.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, hour.into()));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range("minute", 0, 59, minute.into()));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Parses a strict `HH:mm` string, reporting failures against `field`.
    ///
    /// Both components must be exactly two digits; `HH` is 00-23 and `mm` is 00-59.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(ValidationError::invalid_format(field, "expected HH:mm"));
        }

        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(ValidationError::invalid_format(
                field,
                format!("'{}' is not a valid time of day", value),
            ));
        }

        Self::from_hm(hour, minute)
    }

    /// Truncates a `NaiveTime` to minute precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        // hour() <= 23 and minute() <= 59, so this cannot overflow a day.
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }

    /// Minutes since midnight, the comparison key for ordering.
    pub fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Converts to a `NaiveTime` at second zero.
    pub fn to_naive(&self) -> NaiveTime {
        debug_assert!(self.minutes < MINUTES_PER_DAY);
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse("time", &value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}
