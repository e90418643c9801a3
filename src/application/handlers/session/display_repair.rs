//! Lazy refresh of the mentor display snapshot carried by sessions.

use std::sync::Arc;

use crate::domain::session::{MentorDisplay, MentoringSession};
use crate::ports::{Mentor, MentorLookup, SessionStore};

/// Overlays current mentor name/avatar onto sessions whose snapshot is
/// incomplete, and writes only the repaired snapshot back.
///
/// Repair never fails the surrounding use case. Lookup errors leave the
/// session untouched; write errors are logged and the repaired view is
/// still returned.
pub struct MentorDisplayRepair {
    mentors: Arc<dyn MentorLookup>,
    sessions: Arc<dyn SessionStore>,
}

impl MentorDisplayRepair {
    pub fn new(mentors: Arc<dyn MentorLookup>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { mentors, sessions }
    }

    /// Repairs `session` by looking its mentor up.
    pub async fn repair(&self, session: &mut MentoringSession) {
        if session.display_info_complete() {
            return;
        }
        match self.mentors.find_by_id(session.mentor_id()).await {
            Ok(Some(mentor)) => self.repair_with(session, &mentor).await,
            Ok(None) => {
                tracing::warn!(
                    session_id = %session.id(),
                    mentor_id = %session.mentor_id(),
                    "mentor missing, display snapshot left as is"
                );
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error = %err,
                    "mentor lookup failed during display repair"
                );
            }
        }
    }

    /// Repairs `session` from an already loaded mentor.
    pub async fn repair_with(&self, session: &mut MentoringSession, mentor: &Mentor) {
        if session.display_info_complete() {
            return;
        }
        let current = session.mentor_display();
        let fresh = mentor.display();
        let merged = MentorDisplay::new(
            fresh.name.or_else(|| current.name.clone()),
            fresh.avatar.or_else(|| current.avatar.clone()),
        );
        if &merged == current {
            return;
        }

        // Only the display columns are written; the stored status may have
        // moved on since `session` was read.
        match self.sessions.refresh_display(session.id(), &merged).await {
            Ok(()) => {
                tracing::debug!(session_id = %session.id(), "mentor display snapshot repaired");
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error = %err,
                    "repaired display snapshot not persisted"
                );
            }
        }
        session.refresh_mentor_display(merged);
    }
}
