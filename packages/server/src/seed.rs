use sea_orm::sea_query::{
    Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder, SchemaStatementBuilder,
};
use sea_orm::*;
use tracing::info;

use crate::entity::{mentorship, role, role_permission, workshop_registration};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "mentor", "student"];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "mentorship:request"),
    ("admin", "mentorship:manage"),
    ("admin", "workshop:create"),
    ("admin", "workshop:manage"),
    ("admin", "workshop:register"),
    // Mentor: answers requests addressed to them, may attend workshops
    ("mentor", "workshop:register"),
    // Student
    ("student", "mentorship:request"),
    ("student", "workshop:register"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(OnConflict::column(role::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => roles_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => perms_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Composite unique key of the mentorship table: one request per (mentor, student).
fn mentorship_pair_index() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .unique()
        .name("uq_mentorship_mentor_student")
        .table(mentorship::Entity)
        .col(mentorship::Column::MentorId)
        .col(mentorship::Column::StudentId)
        .to_owned()
}

/// Composite unique key of the registration table: one record per (workshop, student).
fn registration_pair_index() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .unique()
        .name("uq_workshop_registration_workshop_student")
        .table(workshop_registration::Entity)
        .col(workshop_registration::Column::WorkshopId)
        .col(workshop_registration::Column::StudentId)
        .to_owned()
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync only creates single-column constraints, so the
/// composite keys are created here. The unique ones back the duplicate
/// checks of both services and must exist; a failure aborts startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    for stmt in [mentorship_pair_index(), registration_pair_index()] {
        let sql = stmt.to_string(PostgresQueryBuilder);
        db.execute_unprepared(&sql).await?;
    }
    info!("Ensured unique indexes on mentorship and workshop_registration pairs");

    // Student-side lookups: GET /mentorships?role=student
    // (mentor-side lookups use the leading column of the unique index)
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_mentorship_student")
        .table(mentorship::Entity)
        .col(mentorship::Column::StudentId)
        .to_string(PostgresQueryBuilder);

    if let Err(e) = db.execute_unprepared(&stmt).await {
        tracing::warn!("Failed to create index idx_mentorship_student: {}", e);
    }

    let stmt = Index::create()
        .if_not_exists()
        .name("idx_workshop_registration_student")
        .table(workshop_registration::Entity)
        .col(workshop_registration::Column::StudentId)
        .to_string(PostgresQueryBuilder);

    if let Err(e) = db.execute_unprepared(&stmt).await {
        tracing::warn!("Failed to create index idx_workshop_registration_student: {}", e);
    }

    Ok(())
}
