use axum::Json;
use axum::extract::{Path, State};
use campus_common::RegistrationStatus;
use tracing::instrument;

use crate::entity::workshop_registration;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::AppQuery;
use crate::models::shared::{Pagination, page_params, parse_status_filter};
use crate::models::workshop::{
    RegistrationListQuery, RegistrationListResponse, RegistrationResponse,
};
use crate::services::registration_service;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Workshop Registrations",
    operation_id = "listMyRegistrations",
    summary = "List the caller's workshop registrations",
    params(RegistrationListQuery),
    responses(
        (status = 200, description = "Registrations", body = RegistrationListResponse),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_my_registrations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RegistrationListQuery>,
) -> Result<Json<RegistrationListResponse>, AppError> {
    let status = parse_status_filter::<RegistrationStatus>(query.status.as_deref())?;
    let (page, per_page) = page_params(query.page, query.per_page);

    let (items, total) = registration_service(&state.db)
        .list_for_student(auth_user.user_id, status, page, per_page)
        .await?;

    Ok(Json(RegistrationListResponse {
        data: items.into_iter().map(RegistrationResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workshop Registrations",
    operation_id = "getRegistration",
    summary = "Get a registration",
    description = "Visible to the registered student and holders of `workshop:manage`. Others get 404.",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration", body = RegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let model = find_visible_registration(&state, &auth_user, id).await?;
    Ok(Json(RegistrationResponse::from(model)))
}

#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = "Workshop Registrations",
    operation_id = "cancelRegistration",
    summary = "Cancel a registration",
    description = "Moves a `registered` record to `cancelled`. Allowed for the registered student and holders of `workshop:manage`. Cancelling is final; a second cancel returns 409.",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Cancelled", body = RegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already cancelled (INVALID_TRANSITION)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn cancel_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RegistrationResponse>, AppError> {
    find_visible_registration(&state, &auth_user, id).await?;

    let model = registration_service(&state.db).cancel(id).await?;

    Ok(Json(RegistrationResponse::from(model)))
}

async fn find_visible_registration(
    state: &AppState,
    auth_user: &AuthUser,
    id: i32,
) -> Result<workshop_registration::Model, AppError> {
    let model = registration_service(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))?;

    if auth_user.user_id == model.student_id || auth_user.has_permission("workshop:manage") {
        Ok(model)
    } else {
        Err(AppError::NotFound("Registration not found".into()))
    }
}
