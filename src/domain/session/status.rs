//! SessionStatus enum for the lifecycle of a mentoring session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a mentoring session.
///
/// ```text
/// PENDING ──confirm──▶ SCHEDULED
///    │                    │
///    ├──reschedule──▶ RESCHEDULED ◀──reschedule──┘ (and from itself)
///    │                    │
///    └──────cancel──▶ CANCELLED ◀──cancel── (any non-terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Pending,
    /// Confirmed.
    Scheduled,
    Rescheduled,
    Cancelled,
}

impl SessionStatus {
    /// Returns true while the session can still change.
    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "PENDING",
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::Rescheduled => "RESCHEDULED",
            SessionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl StateMachine for SessionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Pending => vec![Scheduled, Rescheduled, Cancelled],
            Scheduled => vec![Rescheduled, Cancelled],
            Rescheduled => vec![Rescheduled, Cancelled],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SessionStatus::Pending),
            "SCHEDULED" => Ok(SessionStatus::Scheduled),
            "RESCHEDULED" => Ok(SessionStatus::Rescheduled),
            "CANCELLED" => Ok(SessionStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}
