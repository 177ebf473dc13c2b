use campus_common::RegistrationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, validate_title};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateWorkshopRequest {
    #[schema(example = "Async Rust in practice")]
    pub title: String,
    /// Markdown description.
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<Utc>,
}

pub fn validate_create_workshop(payload: &CreateWorkshopRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    if payload.description.len() > 64 * 1024 {
        return Err(AppError::Validation(
            "Description must be at most 64 KiB".into(),
        ));
    }
    Ok(())
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkshopListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::workshop::Model> for WorkshopResponse {
    fn from(m: crate::entity::workshop::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            starts_at: m.starts_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopListResponse {
    pub data: Vec<WorkshopResponse>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegistrationListQuery {
    /// Filter by status: `registered` or `cancelled`.
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: i32,
    pub workshop_id: i32,
    pub student_id: i32,
    pub registration_date: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::workshop_registration::Model> for RegistrationResponse {
    fn from(m: crate::entity::workshop_registration::Model) -> Self {
        Self {
            id: m.id,
            workshop_id: m.workshop_id,
            student_id: m.student_id,
            registration_date: m.registration_date,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationListResponse {
    pub data: Vec<RegistrationResponse>,
    pub pagination: Pagination,
}
