use campus_common::MentorshipStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's request to be mentored by a mentor.
///
/// `(mentor_id, student_id)` is unique; see `seed::ensure_indexes`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentorship")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub mentor_id: i32,
    #[sea_orm(belongs_to, relation_enum = "Mentor", from = "mentor_id", to = "id")]
    pub mentor: HasOne<super::user::Entity>,

    pub student_id: i32,
    #[sea_orm(belongs_to, relation_enum = "Student", from = "student_id", to = "id")]
    pub student: HasOne<super::user::Entity>,

    pub status: MentorshipStatus,
    pub requested_at: DateTimeUtc,
    /// Set when the mentor accepts or rejects.
    pub responded_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
