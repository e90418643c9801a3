//! Scheduling settings shared by the use-case handlers.

use crate::domain::availability::{AmbiguousTimePolicy, CivilZone};
use crate::domain::scheduling::SchedulingResolver;

/// Defaults applied when a request leaves a field out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingSettings {
    pub default_zone: CivilZone,
    pub resolver: SchedulingResolver,
    pub default_duration_minutes: u32,
}

impl SchedulingSettings {
    pub fn new(
        default_zone: CivilZone,
        ambiguous_time: AmbiguousTimePolicy,
        default_duration_minutes: u32,
    ) -> Self {
        Self {
            default_zone,
            resolver: SchedulingResolver::new(ambiguous_time),
            default_duration_minutes,
        }
    }
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self::new(CivilZone::default(), AmbiguousTimePolicy::default(), 60)
    }
}
