//! Command metadata carried through every use-case handler.
//!
//! Handlers accept the command plus a `CommandMetadata` instead of a loose
//! list of actor/correlation parameters, so log lines emitted while handling
//! a request can be tied back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::UserId;

/// Role of the caller issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    #[default]
    User,
    Mentor,
    Admin,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActorRole::User => "user",
            ActorRole::Mentor => "mentor",
            ActorRole::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The caller executing this command.
    pub actor: UserId,

    /// Role the caller acts in.
    #[serde(default)]
    pub role: ActorRole,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "http", "admin-console").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for a regular user.
    pub fn new(actor: UserId) -> Self {
        Self {
            actor,
            role: ActorRole::User,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: set the caller's role.
    pub fn with_role(mut self, role: ActorRole) -> Self {
        self.role = role;
        self
    }

    /// Builder: add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// True when the caller acts with administrative rights.
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture for a regular user.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-user-123").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
