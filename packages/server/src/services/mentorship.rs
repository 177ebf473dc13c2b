use campus_common::MentorshipStatus;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::{info, instrument};

use super::{ServiceError, find_user, validate_id};
use crate::models::shared::page_offset;
use crate::entity::{mentorship, role};

pub struct MentorshipService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MentorshipService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Record a student's request to be mentored.
    ///
    /// The new record is always `pending`. A second request for the same
    /// (mentor, student) pair fails with `DuplicateRequest`, whatever the
    /// state of the first one.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        mentor_id: i32,
        student_id: i32,
    ) -> Result<mentorship::Model, ServiceError> {
        validate_id(mentor_id, "mentor_id")?;
        validate_id(student_id, "student_id")?;
        if mentor_id == student_id {
            return Err(ServiceError::Validation(
                "A user cannot request mentorship from themselves".into(),
            ));
        }

        let mentor = find_user(self.conn, mentor_id, "Mentor").await?;
        if mentor.role != role::MENTOR_ROLE {
            return Err(ServiceError::Validation(format!(
                "User {mentor_id} is not a mentor"
            )));
        }
        find_user(self.conn, student_id, "Student").await?;

        let model = mentorship::ActiveModel {
            mentor_id: Set(mentor_id),
            student_id: Set(student_id),
            status: Set(MentorshipStatus::Pending),
            requested_at: Set(Utc::now()),
            responded_at: Set(None),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(inserted) => {
                info!(id = inserted.id, "Mentorship requested");
                Ok(inserted)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ServiceError::DuplicateRequest)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Answer a pending request with `accepted` or `rejected`.
    ///
    /// The update only matches rows in a state that may move to `new_status`
    /// (just `pending`), so concurrent answers cannot both succeed and an
    /// answered request never changes again.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i32,
        new_status: MentorshipStatus,
    ) -> Result<mentorship::Model, ServiceError> {
        if !new_status.is_terminal() {
            return Err(ServiceError::Validation(
                "Status must be one of: accepted, rejected".into(),
            ));
        }

        let result = mentorship::Entity::update_many()
            .col_expr(mentorship::Column::Status, Expr::value(new_status))
            .col_expr(mentorship::Column::RespondedAt, Expr::value(Utc::now()))
            .filter(mentorship::Column::Id.eq(id))
            .filter(mentorship::Column::Status.is_in(MentorshipStatus::sources_of(new_status)))
            .exec(self.conn)
            .await?;

        let current = self
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound("Mentorship"))?;

        if result.rows_affected == 0 {
            current.status.transition_to(new_status)?;
        }

        info!(id, status = %new_status, "Mentorship answered");
        Ok(current)
    }

    pub async fn get(&self, id: i32) -> Result<Option<mentorship::Model>, ServiceError> {
        Ok(mentorship::Entity::find_by_id(id).one(self.conn).await?)
    }

    /// Requests addressed to a mentor, newest first.
    pub async fn list_for_mentor(
        &self,
        mentor_id: i32,
        status: Option<MentorshipStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<mentorship::Model>, u64), ServiceError> {
        self.list(mentorship::Column::MentorId, mentor_id, status, page, per_page)
            .await
    }

    /// Requests issued by a student, newest first.
    pub async fn list_for_student(
        &self,
        student_id: i32,
        status: Option<MentorshipStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<mentorship::Model>, u64), ServiceError> {
        self.list(mentorship::Column::StudentId, student_id, status, page, per_page)
            .await
    }

    async fn list(
        &self,
        party: mentorship::Column,
        user_id: i32,
        status: Option<MentorshipStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<mentorship::Model>, u64), ServiceError> {
        let mut query = mentorship::Entity::find().filter(party.eq(user_id));

        if let Some(status) = status {
            query = query.filter(mentorship::Column::Status.eq(status));
        }

        let total = query.clone().count(self.conn).await?;

        let items = query
            .order_by_desc(mentorship::Column::RequestedAt)
            .order_by_desc(mentorship::Column::Id)
            .offset(page_offset(page, per_page))
            .limit(per_page)
            .all(self.conn)
            .await?;

        Ok((items, total))
    }
}

/// Create a MentorshipService with a DatabaseConnection.
pub fn mentorship_service(db: &DatabaseConnection) -> MentorshipService<'_, DatabaseConnection> {
    MentorshipService::new(db)
}
