//! Scheduling defaults

use serde::Deserialize;

use crate::application::SchedulingSettings;
use crate::domain::availability::{AmbiguousTimePolicy, CivilZone, DEFAULT_TIMEZONE};
use crate::domain::session::MAX_DURATION_MINUTES;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// IANA zone used when a request or window omits one
    #[serde(default = "default_timezone")]
    pub default_timezone: String,

    /// Resolution of civil times repeated by a DST fall-back
    #[serde(default)]
    pub ambiguous_time: AmbiguousTimePolicy,

    /// Session length when a booking omits it
    #[serde(default = "default_duration")]
    pub default_duration_minutes: u32,
}

impl SchedulingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.zone()?;
        if self.default_duration_minutes == 0
            || self.default_duration_minutes > MAX_DURATION_MINUTES
        {
            return Err(ValidationError::InvalidDuration);
        }
        Ok(())
    }

    fn zone(&self) -> Result<CivilZone, ValidationError> {
        CivilZone::parse("scheduling.default_timezone", &self.default_timezone)
            .map_err(|_| ValidationError::InvalidTimezone(self.default_timezone.clone()))
    }

    /// Settings handed to the use-case handlers.
    pub fn settings(&self) -> Result<SchedulingSettings, ValidationError> {
        self.validate()?;
        Ok(SchedulingSettings::new(
            self.zone()?,
            self.ambiguous_time,
            self.default_duration_minutes,
        ))
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
            ambiguous_time: AmbiguousTimePolicy::default(),
            default_duration_minutes: default_duration(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_duration() -> u32 {
    60
}
