use campus_common::RegistrationStatus;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::{info, instrument};

use super::{ServiceError, find_user, validate_id};
use crate::models::shared::page_offset;
use crate::entity::{workshop, workshop_registration};

pub struct RegistrationService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Enroll a student in a workshop.
    ///
    /// Fails with `DuplicateRegistration` if the pair already has a record,
    /// including a cancelled one.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        workshop_id: i32,
        student_id: i32,
    ) -> Result<workshop_registration::Model, ServiceError> {
        validate_id(workshop_id, "workshop_id")?;
        validate_id(student_id, "student_id")?;

        workshop::Entity::find_by_id(workshop_id)
            .one(self.conn)
            .await?
            .ok_or(ServiceError::NotFound("Workshop"))?;
        find_user(self.conn, student_id, "Student").await?;

        let now = Utc::now();
        let model = workshop_registration::ActiveModel {
            workshop_id: Set(workshop_id),
            student_id: Set(student_id),
            registration_date: Set(now),
            status: Set(RegistrationStatus::Registered),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(inserted) => {
                info!(id = inserted.id, "Workshop registration created");
                Ok(inserted)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ServiceError::DuplicateRegistration)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move a registration to `cancelled`. Cancelling twice is an invalid transition.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i32) -> Result<workshop_registration::Model, ServiceError> {
        let result = workshop_registration::Entity::update_many()
            .col_expr(
                workshop_registration::Column::Status,
                Expr::value(RegistrationStatus::Cancelled),
            )
            .col_expr(
                workshop_registration::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(workshop_registration::Column::Id.eq(id))
            .filter(
                workshop_registration::Column::Status
                    .is_in(RegistrationStatus::sources_of(RegistrationStatus::Cancelled)),
            )
            .exec(self.conn)
            .await?;

        let current = self
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound("Registration"))?;

        if result.rows_affected == 0 {
            current.status.transition_to(RegistrationStatus::Cancelled)?;
        }

        info!(id, "Workshop registration cancelled");
        Ok(current)
    }

    pub async fn get(&self, id: i32) -> Result<Option<workshop_registration::Model>, ServiceError> {
        Ok(workshop_registration::Entity::find_by_id(id)
            .one(self.conn)
            .await?)
    }

    /// Registrations for one workshop, in registration order.
    pub async fn list_for_workshop(
        &self,
        workshop_id: i32,
        status: Option<RegistrationStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<workshop_registration::Model>, u64), ServiceError> {
        self.list(
            workshop_registration::Column::WorkshopId,
            workshop_id,
            status,
            page,
            per_page,
        )
        .await
    }

    /// A student's registrations, in registration order.
    pub async fn list_for_student(
        &self,
        student_id: i32,
        status: Option<RegistrationStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<workshop_registration::Model>, u64), ServiceError> {
        self.list(
            workshop_registration::Column::StudentId,
            student_id,
            status,
            page,
            per_page,
        )
        .await
    }

    async fn list(
        &self,
        key: workshop_registration::Column,
        value: i32,
        status: Option<RegistrationStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<workshop_registration::Model>, u64), ServiceError> {
        let mut query = workshop_registration::Entity::find().filter(key.eq(value));

        if let Some(status) = status {
            query = query.filter(workshop_registration::Column::Status.eq(status));
        }

        let total = query.clone().count(self.conn).await?;

        let items = query
            .order_by_asc(workshop_registration::Column::RegistrationDate)
            .order_by_asc(workshop_registration::Column::Id)
            .offset(page_offset(page, per_page))
            .limit(per_page)
            .all(self.conn)
            .await?;

        Ok((items, total))
    }
}

/// Create a RegistrationService with a DatabaseConnection.
pub fn registration_service(
    db: &DatabaseConnection,
) -> RegistrationService<'_, DatabaseConnection> {
    RegistrationService::new(db)
}
