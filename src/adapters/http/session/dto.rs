//! Request/response bodies for session endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::scheduling::BookingTimeInput;
use crate::domain::session::{MeetingInfo, MentoringSession, SessionStatus};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/sessions`.
///
/// The booking time is either `date` + `time` (+ optional `timezone`) or
/// `scheduledAt` + `timezone`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub mentor_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<i64>,
    pub topic: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateSessionRequest {
    pub fn booking_time(&self) -> BookingTimeInput {
        BookingTimeInput {
            date: self.date.clone(),
            time: self.time.clone(),
            scheduled_at: self.scheduled_at.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

/// Body of `POST /api/admin/sessions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateSessionRequest {
    /// User the session is booked for.
    pub user_id: String,
    #[serde(flatten)]
    pub booking: CreateSessionRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfirmSessionRequest {
    pub meeting_link: Option<String>,
    pub meeting_id: Option<String>,
}

impl ConfirmSessionRequest {
    pub fn meeting(self) -> Option<MeetingInfo> {
        let meeting = MeetingInfo::new(self.meeting_link, self.meeting_id);
        (!meeting.is_empty()).then_some(meeting)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleSessionRequest {
    pub new_start_utc: String,
    pub new_end_utc: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSessionRequest {
    pub scheduled_at: Option<String>,
    pub duration: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListSessionsParams {
    pub status: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// A session as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub mentor_id: String,
    pub user_id: String,
    pub scheduled_at: String,
    pub ends_at: String,
    pub timezone: String,
    pub duration: u32,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: SessionStatus,
    pub mentor_name: Option<String>,
    pub mentor_avatar: Option<String>,
    pub display_info_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&MentoringSession> for SessionResponse {
    fn from(session: &MentoringSession) -> Self {
        let meeting = session.meeting();
        Self {
            id: session.id().to_string(),
            mentor_id: session.mentor_id().to_string(),
            user_id: session.user_id().to_string(),
            scheduled_at: session.scheduled_at().to_iso_string(),
            ends_at: session.ends_at().to_iso_string(),
            timezone: session.timezone().name().to_string(),
            duration: session.duration_minutes(),
            topic: session.topic().to_string(),
            notes: session.notes().map(str::to_string),
            status: session.status(),
            mentor_name: session.mentor_display().name.clone(),
            mentor_avatar: session.mentor_display().avatar.clone(),
            display_info_complete: session.display_info_complete(),
            meeting_link: meeting.and_then(|m| m.meeting_link.clone()),
            meeting_id: meeting.and_then(|m| m.meeting_id.clone()),
            created_at: session.created_at().to_iso_string(),
            updated_at: session.updated_at().to_iso_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionResponse>,
    pub total: usize,
}

impl From<&[MentoringSession]> for SessionListResponse {
    fn from(sessions: &[MentoringSession]) -> Self {
        let items: Vec<SessionResponse> = sessions.iter().map(SessionResponse::from).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
