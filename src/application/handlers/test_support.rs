//! Mutex-backed port mocks shared by handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::availability::{
    validate_window, AvailabilityWindow, CivilZone, WindowInput,
};
use crate::domain::foundation::{
    AvailabilityId, CommandMetadata, DomainError, ErrorCode, MentorId, SessionId, Timestamp,
    UserId,
};
use crate::domain::scheduling::ResolvedSlot;
use crate::domain::session::{
    BookingOrigin, MentorDisplay, MentoringSession, SessionDraft, SessionStatus,
};
use crate::ports::{AvailabilityStore, Mentor, MentorLookup, SessionStore};

pub fn metadata() -> CommandMetadata {
    CommandMetadata::test_fixture()
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// Sunday-first window input in Sao Paulo.
pub fn window_input(day: i64, start: &str, end: &str) -> WindowInput {
    WindowInput {
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        timezone: Some("America/Sao_Paulo".to_string()),
        is_active: None,
    }
}

pub fn window(mentor_id: MentorId, day: i64, start: &str, end: &str) -> AvailabilityWindow {
    let fields = validate_window(&window_input(day, start, end), CivilZone::default()).unwrap();
    AvailabilityWindow::new(mentor_id, fields)
}

/// Sao Paulo slot at a UTC instant.
pub fn slot(iso: &str) -> ResolvedSlot {
    ResolvedSlot {
        scheduled_at: Timestamp::parse_iso("scheduledAt", iso).unwrap(),
        timezone: CivilZone::default(),
    }
}

/// Pending session on Monday 2024-06-03 10:00 Sao Paulo.
pub fn session_for(mentor_id: MentorId) -> MentoringSession {
    MentoringSession::book(
        SessionDraft {
            mentor_id,
            user_id: user("user-1"),
            slot: slot("2024-06-03T13:00:00Z"),
            duration_minutes: 60,
            topic: "Career planning".to_string(),
            notes: None,
            mentor_display: MentorDisplay::new(Some("Ana".into()), Some("ana.png".into())),
        },
        BookingOrigin::User,
    )
    .unwrap()
}

pub fn pending_session() -> MentoringSession {
    session_for(MentorId::new())
}

fn simulated_failure() -> DomainError {
    DomainError::database("simulated failure: connection reset by 10.1.2.3")
}

// ─────────────────────────────────────────────────────────────────────────────
// MentorLookup
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockMentors {
    mentors: Mutex<Vec<Mentor>>,
}

impl MockMentors {
    pub fn empty() -> Self {
        Self {
            mentors: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mentor: Mentor) -> Self {
        Self {
            mentors: Mutex::new(vec![mentor]),
        }
    }
}

pub fn mentor(name: &str, avatar: Option<&str>) -> Mentor {
    Mentor {
        id: MentorId::new(),
        name: name.to_string(),
        avatar: avatar.map(str::to_string),
    }
}

#[async_trait]
impl MentorLookup for MockMentors {
    async fn find_by_id(&self, id: &MentorId) -> Result<Option<Mentor>, DomainError> {
        Ok(self.mentors.lock().unwrap().iter().find(|m| &m.id == id).cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AvailabilityStore
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockAvailability {
    windows: Mutex<Vec<AvailabilityWindow>>,
    fail: bool,
}

impl MockAvailability {
    pub fn new() -> Self {
        Self::with(Vec::new())
    }

    pub fn with(windows: Vec<AvailabilityWindow>) -> Self {
        Self {
            windows: Mutex::new(windows),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            windows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn windows(&self) -> Vec<AvailabilityWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvailabilityStore for MockAvailability {
    async fn find_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<AvailabilityWindow>, DomainError> {
        if self.fail {
            return Err(simulated_failure());
        }
        Ok(self
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.belongs_to(mentor_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &AvailabilityId) -> Result<Option<AvailabilityWindow>, DomainError> {
        if self.fail {
            return Err(simulated_failure());
        }
        Ok(self.windows.lock().unwrap().iter().find(|w| w.id() == id).cloned())
    }

    async fn create(&self, window: &AvailabilityWindow) -> Result<AvailabilityWindow, DomainError> {
        if self.fail {
            return Err(simulated_failure());
        }
        self.windows.lock().unwrap().push(window.clone());
        Ok(window.clone())
    }

    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        let mut windows = self.windows.lock().unwrap();
        match windows.iter_mut().find(|w| w.id() == window.id()) {
            Some(slot) => {
                *slot = window.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::AvailabilityNotFound, "missing")
                .with_detail("id", window.id().to_string())),
        }
    }

    async fn delete(&self, mentor_id: &MentorId, id: &AvailabilityId) -> Result<bool, DomainError> {
        let mut windows = self.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|w| !(w.id() == id && w.belongs_to(mentor_id)));
        Ok(windows.len() != before)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionStore
// ─────────────────────────────────────────────────────────────────────────────

/// Records every write so tests can assert on what reached storage.
pub struct MockSessions {
    sessions: Mutex<Vec<MentoringSession>>,
    writes: Mutex<Vec<&'static str>>,
    reasons: Mutex<Vec<Option<String>>>,
    /// Drop the display snapshot on insert, like a store with a placeholder default.
    placeholder_display: bool,
    fail_writes: bool,
}

impl MockSessions {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            reasons: Mutex::new(Vec::new()),
            placeholder_display: false,
            fail_writes: false,
        }
    }

    pub fn with(session: MentoringSession) -> Self {
        let store = Self::new();
        store.sessions.lock().unwrap().push(session);
        store
    }

    /// Returns created sessions with an empty mentor display snapshot.
    pub fn dropping_display() -> Self {
        Self {
            placeholder_display: true,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Holds `session` but fails every write.
    pub fn failing_with(session: MentoringSession) -> Self {
        let store = Self::failing();
        store.sessions.lock().unwrap().push(session);
        store
    }

    pub fn stored(&self, id: &SessionId) -> Option<MentoringSession> {
        self.sessions.lock().unwrap().iter().find(|s| s.id() == id).cloned()
    }

    pub fn all(&self) -> Vec<MentoringSession> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<&'static str> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reasons(&self) -> Vec<Option<String>> {
        self.reasons.lock().unwrap().clone()
    }

    fn insert(&self, op: &'static str, session: &MentoringSession) -> Result<MentoringSession, DomainError> {
        if self.fail_writes {
            return Err(simulated_failure());
        }
        let mut stored = session.clone();
        if self.placeholder_display {
            stored.refresh_mentor_display(Default::default());
        }
        self.writes.lock().unwrap().push(op);
        self.sessions.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    fn replace(
        &self,
        op: &'static str,
        session: &MentoringSession,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(simulated_failure());
        }
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id() == session.id()) {
            Some(slot) if slot.status() != expected => Err(DomainError::state_conflict(
                "status",
                format!("session is {}", slot.status()),
            )),
            Some(slot) => {
                *slot = session.clone();
                self.writes.lock().unwrap().push(op);
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::SessionNotFound, "missing")
                .with_detail("id", session.id().to_string())),
        }
    }

    /// Overwrites a stored session with no status check, as another request would.
    pub fn overwrite(&self, session: MentoringSession) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(slot) = sessions.iter_mut().find(|s| s.id() == session.id()) {
            *slot = session;
        }
    }
}

#[async_trait]
impl SessionStore for MockSessions {
    async fn create(&self, session: &MentoringSession) -> Result<MentoringSession, DomainError> {
        self.insert("create", session)
    }

    async fn create_for_user_by_admin(
        &self,
        session: &MentoringSession,
        _admin: &UserId,
    ) -> Result<MentoringSession, DomainError> {
        self.insert("create_for_user_by_admin", session)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError> {
        Ok(self.stored(id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<MentoringSession>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|s| s.user_id() == user_id)
            .collect())
    }

    async fn confirm(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace("confirm", session, expected)
    }

    async fn reschedule(
        &self,
        session: &MentoringSession,
        expected: SessionStatus,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        self.replace("reschedule", session, expected)?;
        self.reasons.lock().unwrap().push(reason.map(str::to_string));
        Ok(())
    }

    async fn cancel(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace("cancel", session, expected)
    }

    async fn update(&self, session: &MentoringSession, expected: SessionStatus) -> Result<(), DomainError> {
        self.replace("update", session, expected)
    }

    async fn refresh_display(&self, id: &SessionId, display: &MentorDisplay) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(simulated_failure());
        }
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id() == id) {
            Some(slot) => {
                slot.refresh_mentor_display(display.clone());
                self.writes.lock().unwrap().push("refresh_display");
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::SessionNotFound, "missing")
                .with_detail("id", id.to_string())),
        }
    }
}
