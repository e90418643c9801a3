//! Mentor lookup port.
//!
//! Mentor profiles are owned elsewhere; scheduling only needs to know that a
//! mentor exists and how to display them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MentorId};
use crate::domain::session::MentorDisplay;

/// Mentor profile fields used by scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mentor {
    pub id: MentorId,
    pub name: String,
    pub avatar: Option<String>,
}

impl Mentor {
    /// Display snapshot to copy onto sessions.
    pub fn display(&self) -> MentorDisplay {
        MentorDisplay::new(Some(self.name.clone()), self.avatar.clone())
    }
}

/// Read-only access to mentor profiles.
#[async_trait]
pub trait MentorLookup: Send + Sync {
    /// Find a mentor by ID.
    ///
    /// Returns `None` if the mentor does not exist.
    async fn find_by_id(&self, id: &MentorId) -> Result<Option<Mentor>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentor_lookup_is_object_safe() {
        fn _accepts_dyn(_lookup: &dyn MentorLookup) {}
    }

    #[test]
    fn display_is_incomplete_without_avatar() {
        let mentor = Mentor {
            id: MentorId::new(),
            name: "Ana".to_string(),
            avatar: None,
        };
        assert!(!mentor.display().is_complete());
    }
}
