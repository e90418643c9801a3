//! Stable error taxonomy surfaced by every scheduling use case.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Message returned in place of infrastructure failures.
pub const UNAVAILABLE_MESSAGE: &str =
    "The request could not be completed right now. Please try again later.";

/// Field reported when an infrastructure failure is re-wrapped.
pub const REQUEST_FIELD: &str = "request";

/// Kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Mentor,
    Session,
    AvailabilityWindow,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Mentor => "Mentor",
            EntityKind::Session => "Session",
            EntityKind::AvailabilityWindow => "Availability window",
        };
        write!(f, "{}", s)
    }
}

/// Errors returned by scheduling use cases.
///
/// Only two kinds ever reach a caller: rejected input and missing entities.
/// Infrastructure failures are folded into `Validation` with a user-safe
/// message by the `From<DomainError>` conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
}

impl SchedulingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        SchedulingError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::Validation { .. } => ErrorCode::ValidationFailed,
            SchedulingError::NotFound { kind, .. } => match kind {
                EntityKind::Mentor => ErrorCode::MentorNotFound,
                EntityKind::Session => ErrorCode::SessionNotFound,
                EntityKind::AvailabilityWindow => ErrorCode::AvailabilityNotFound,
            },
        }
    }

    /// Field the error is scoped to, if it is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchedulingError::Validation { field, .. } => Some(field),
            SchedulingError::NotFound { .. } => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SchedulingError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SchedulingError::NotFound { .. })
    }
}

impl From<ValidationError> for SchedulingError {
    fn from(err: ValidationError) -> Self {
        SchedulingError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        if err.code.is_validation() {
            let field = err.detail("field").unwrap_or(REQUEST_FIELD).to_string();
            return SchedulingError::Validation {
                field,
                message: err.message,
            };
        }

        if err.code.is_not_found() {
            let kind = match err.code {
                ErrorCode::MentorNotFound => EntityKind::Mentor,
                ErrorCode::AvailabilityNotFound => EntityKind::AvailabilityWindow,
                _ => EntityKind::Session,
            };
            let id = err.detail("id").map(str::to_string).unwrap_or(err.message);
            return SchedulingError::NotFound { kind, id };
        }

        tracing::error!(code = %err.code, error = %err.message, "store failure hidden from caller");
        SchedulingError::Validation {
            field: REQUEST_FIELD.to_string(),
            message: UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}
