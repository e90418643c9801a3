//! Caller identity extractor.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! caller in `x-user-id` and, for elevated callers, `x-user-role`. A caller
//! with role `mentor` forwards its mentor id as `x-user-id`.
//!
//! ```ignore
//! async fn my_handler(RequireUser(caller): RequireUser) -> impl IntoResponse {
//!     format!("Hello, {}!", caller.user_id)
//! }
//! ```

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{ActorRole, CommandMetadata, MentorId, UserId};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub role: ActorRole,
    request_id: Option<String>,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }

    /// True when the caller is the given mentor.
    pub fn is_mentor(&self, mentor_id: &MentorId) -> bool {
        self.role == ActorRole::Mentor && self.user_id.as_str() == mentor_id.to_string()
    }

    /// Mentors manage their own schedule; admins manage every mentor's.
    pub fn manages(&self, mentor_id: &MentorId) -> bool {
        self.is_admin() || self.is_mentor(mentor_id)
    }

    /// Command metadata for this request.
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.user_id.clone())
            .with_role(self.role)
            .with_source("http");
        match &self.request_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, IdentityRejection> {
        let raw = header(headers, USER_ID_HEADER).ok_or(IdentityRejection::MissingUser)?;
        let user_id = UserId::new(raw).map_err(|_| IdentityRejection::MissingUser)?;
        let role = match header(headers, USER_ROLE_HEADER) {
            None => ActorRole::User,
            Some(raw) => parse_role(raw).ok_or(IdentityRejection::UnknownRole)?,
        };
        Ok(Self {
            user_id,
            role,
            request_id: header(headers, REQUEST_ID_HEADER).map(str::to_string),
        })
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_role(raw: &str) -> Option<ActorRole> {
    match raw.to_ascii_lowercase().as_str() {
        "user" => Some(ActorRole::User),
        "mentor" => Some(ActorRole::Mentor),
        "admin" => Some(ActorRole::Admin),
        _ => None,
    }
}

/// Rejection returned when no usable identity was forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRejection {
    MissingUser,
    UnknownRole,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let message = match self {
            IdentityRejection::MissingUser => "Missing caller identity",
            IdentityRejection::UnknownRole => "Unknown caller role",
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized(message))).into_response()
    }
}

/// Extractor that requires a forwarded caller identity.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Caller::from_headers(&parts.headers).map(RequireUser)
    }
}
