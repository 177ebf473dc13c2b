use campus_common::RegistrationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's enrollment in a workshop.
///
/// `(workshop_id, student_id)` is unique; see `seed::ensure_indexes`.
/// Rows are never deleted, so a cancelled registration still blocks re-registration.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub workshop_id: i32,
    #[sea_orm(belongs_to, from = "workshop_id", to = "id")]
    pub workshop: HasOne<super::workshop::Entity>,

    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::user::Entity>,

    pub registration_date: DateTimeUtc,
    pub status: RegistrationStatus,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
