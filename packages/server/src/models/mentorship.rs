use campus_common::MentorshipStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::Pagination;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMentorshipRequest {
    /// User ID of the mentor being asked. The student is always the caller.
    #[schema(example = 3)]
    pub mentor_id: i32,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateMentorshipStatusRequest {
    /// `accepted` or `rejected`.
    #[schema(example = "accepted")]
    pub status: String,
}

/// Parse the mentor's answer. Anything but `accepted`/`rejected` is a validation error.
pub fn parse_response_status(raw: &str) -> Result<MentorshipStatus, AppError> {
    let status: MentorshipStatus = raw
        .trim()
        .parse()
        .map_err(|e: campus_common::ParseStatusError| AppError::Validation(e.to_string()))?;
    if !MentorshipStatus::RESPONSES.contains(&status) {
        return Err(AppError::Validation(
            "Status must be one of: accepted, rejected".into(),
        ));
    }
    Ok(status)
}

/// Which side of the mentorship the listing is for.
#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipParty {
    Mentor,
    #[default]
    Student,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MentorshipListQuery {
    /// `mentor` lists requests addressed to the caller, `student` (default) those the caller sent.
    #[param(inline)]
    pub role: Option<MentorshipParty>,
    /// Filter by status: `pending`, `accepted` or `rejected`.
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MentorshipResponse {
    pub id: i32,
    pub mentor_id: i32,
    pub student_id: i32,
    pub status: MentorshipStatus,
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<crate::entity::mentorship::Model> for MentorshipResponse {
    fn from(m: crate::entity::mentorship::Model) -> Self {
        Self {
            id: m.id,
            mentor_id: m.mentor_id,
            student_id: m.student_id,
            status: m.status,
            requested_at: m.requested_at,
            responded_at: m.responded_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MentorshipListResponse {
    pub data: Vec<MentorshipResponse>,
    pub pagination: Pagination,
}
