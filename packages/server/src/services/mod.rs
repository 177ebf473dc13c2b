//! Data-access layer for the two record stores.
//!
//! Services own the integrity rules: required references, the composite
//! uniqueness of each record's key pair, and the terminal status transitions.
//! Handlers only decide who may call them.

pub mod mentorship;
pub mod registration;

use campus_common::TransitionError;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use thiserror::Error;

use crate::entity::user;

pub use mentorship::{MentorshipService, mentorship_service};
pub use registration::{RegistrationService, registration_service};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("mentorship already requested for this mentor")]
    DuplicateRequest,
    #[error("already registered for this workshop")]
    DuplicateRegistration,
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Reject ids that can never reference a row.
pub(crate) fn validate_id(id: i32, name: &str) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!(
            "{name} must be a positive integer"
        )));
    }
    Ok(())
}

/// Look up a referenced user, reporting `what` when it is missing.
pub(crate) async fn find_user<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    what: &'static str,
) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(ServiceError::NotFound(what))
}
