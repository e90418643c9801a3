//! Request/response bodies for availability endpoints.
//!
//! `dayOfWeek` is Sunday-first (0 = Sunday) on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::availability::{
    sunday_first_from_iso, AvailabilityWindow, WindowInput, WindowPatchInput,
};

/// Body of `POST /api/mentors/:mentor_id/availability`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWindowRequest {
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<CreateWindowRequest> for WindowInput {
    fn from(req: CreateWindowRequest) -> Self {
        WindowInput {
            day_of_week: req.day_of_week,
            start_time: req.start_time,
            end_time: req.end_time,
            timezone: req.timezone,
            is_active: req.is_active,
        }
    }
}

/// Body of `PATCH /api/mentors/:mentor_id/availability/:window_id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateWindowRequest {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub timezone: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateWindowRequest> for WindowPatchInput {
    fn from(req: UpdateWindowRequest) -> Self {
        WindowPatchInput {
            day_of_week: req.day_of_week,
            start_time: req.start_time,
            end_time: req.end_time,
            timezone: req.timezone,
            is_active: req.is_active,
        }
    }
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListWindowsParams {
    pub active_only: bool,
}

/// A window as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowResponse {
    pub id: String,
    pub mentor_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AvailabilityWindow> for WindowResponse {
    fn from(window: &AvailabilityWindow) -> Self {
        Self {
            id: window.id().to_string(),
            mentor_id: window.mentor_id().to_string(),
            day_of_week: sunday_first_from_iso(window.day_of_week()).value(),
            start_time: window.start_time().to_string(),
            end_time: window.end_time().to_string(),
            timezone: window.timezone().name().to_string(),
            is_active: window.is_active(),
            created_at: window.created_at().to_iso_string(),
            updated_at: window.updated_at().to_iso_string(),
        }
    }
}

/// Body of a delete response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWindowResponse {
    pub window_id: String,
    pub removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::{validate_window, CivilZone};
    use crate::domain::foundation::MentorId;

    #[test]
    fn create_request_deserializes_camel_case() {
        let json = r#"{"dayOfWeek": 0, "startTime": "09:00", "endTime": "12:00"}"#;
        let req: CreateWindowRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.day_of_week, 0);
        assert!(req.timezone.is_none());
        assert!(req.is_active.is_none());
    }

    #[test]
    fn sunday_round_trips_to_zero() {
        let input: WindowInput = CreateWindowRequest {
            day_of_week: 0,
            start_time: "09:00".into(),
            end_time: "12:00".into(),
            timezone: None,
            is_active: None,
        }
        .into();
        let window = AvailabilityWindow::new(
            MentorId::new(),
            validate_window(&input, CivilZone::default()).unwrap(),
        );
        assert_eq!(window.day_of_week().value(), 7);

        let response = WindowResponse::from(&window);
        assert_eq!(response.day_of_week, 0);
        assert_eq!(response.start_time, "09:00");
        assert_eq!(response.timezone, "America/Sao_Paulo");
    }
}
