//! IANA timezone handling and civil-to-UTC resolution.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Zone applied when a request or window omits one.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Longest DST gap handled when probing the pre-transition offset.
const GAP_PROBE_HOURS: i64 = 3;

/// How a civil time that occurs twice (DST fall-back) is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguousTimePolicy {
    /// First occurrence, i.e. the pre-transition offset.
    #[default]
    Earliest,
    /// Second occurrence, i.e. the post-transition offset.
    Latest,
}

/// A validated IANA zone name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CivilZone(Tz);

impl CivilZone {
    /// Parses an IANA zone name, reporting failures against `field`.
    pub fn parse(field: &str, name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        trimmed
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| ValidationError::invalid(field, format!("unknown IANA timezone '{}'", trimmed)))
    }

    /// Parses an optional zone, falling back to `default` when absent.
    pub fn parse_or(
        field: &str,
        name: Option<&str>,
        default: CivilZone,
    ) -> Result<Self, ValidationError> {
        match name {
            Some(name) => Self::parse(field, name),
            None => Ok(default),
        }
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Converts a civil date-time in this zone to a UTC instant.
    ///
    /// Ambiguous times follow `policy`. Nonexistent times (inside a
    /// spring-forward gap) are read with the offset in force before the gap,
    /// which moves them forward by the gap length.
    pub fn resolve_local(&self, local: NaiveDateTime, policy: AmbiguousTimePolicy) -> Timestamp {
        let utc = match self.0.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(a, b) => {
                let (early, late) = if a <= b { (a, b) } else { (b, a) };
                match policy {
                    AmbiguousTimePolicy::Earliest => early.with_timezone(&Utc),
                    AmbiguousTimePolicy::Latest => late.with_timezone(&Utc),
                }
            }
            LocalResult::None => self.resolve_in_gap(local),
        };
        Timestamp::from_datetime(utc)
    }

    /// Wall-clock reading of an instant in this zone.
    pub fn local_datetime(&self, instant: &Timestamp) -> NaiveDateTime {
        instant.as_datetime().with_timezone(&self.0).naive_local()
    }

    fn resolve_in_gap(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let probe = local - Duration::hours(GAP_PROBE_HOURS);
        let offset_secs = self
            .0
            .offset_from_local_datetime(&probe)
            .earliest()
            .unwrap_or_else(|| self.0.offset_from_utc_datetime(&local))
            .fix()
            .local_minus_utc();
        Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset_secs))))
    }
}

impl Default for CivilZone {
    fn default() -> Self {
        Self(Tz::America__Sao_Paulo)
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for CivilZone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CivilZone::parse("timezone", &value)
    }
}

impl From<CivilZone> for String {
    fn from(zone: CivilZone) -> Self {
        zone.name().to_string()
    }
}
