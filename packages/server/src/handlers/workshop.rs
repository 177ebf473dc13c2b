use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_common::RegistrationStatus;
use sea_orm::*;
use tracing::instrument;

use crate::entity::workshop;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppQuery};
use crate::models::shared::{Pagination, page_offset, page_params, parse_status_filter};
use crate::models::workshop::*;
use crate::services::registration_service;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Workshops",
    operation_id = "createWorkshop",
    summary = "Create a workshop",
    description = "Requires `workshop:create` permission.",
    request_body = CreateWorkshopRequest,
    responses(
        (status = 201, description = "Workshop created", body = WorkshopResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkshopRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("workshop:create")?;
    validate_create_workshop(&payload)?;

    let now = chrono::Utc::now();
    let new_workshop = workshop::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        starts_at: Set(payload.starts_at),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_workshop.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(WorkshopResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Workshops",
    operation_id = "listWorkshops",
    summary = "List workshops",
    description = "Paginated, newest first.",
    params(WorkshopListQuery),
    responses(
        (status = 200, description = "Workshops", body = WorkshopListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_workshops(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WorkshopListQuery>,
) -> Result<Json<WorkshopListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let select = workshop::Entity::find();
    let total = select.clone().count(&state.db).await?;

    let items = select
        .order_by_desc(workshop::Column::CreatedAt)
        .order_by_desc(workshop::Column::Id)
        .offset(page_offset(page, per_page))
        .limit(per_page)
        .all(&state.db)
        .await?;

    Ok(Json(WorkshopListResponse {
        data: items.into_iter().map(WorkshopResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "getWorkshop",
    summary = "Get a workshop",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Workshop", body = WorkshopResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_workshop(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WorkshopResponse>, AppError> {
    let model = find_workshop(&state.db, id).await?;
    Ok(Json(WorkshopResponse::from(model)))
}

#[utoipa::path(
    post,
    path = "/{id}/registrations",
    tag = "Workshop Registrations",
    operation_id = "registerForWorkshop",
    summary = "Register the caller for a workshop",
    description = "Creates a `registered` record for the caller. Requires `workshop:register` permission. Only one record may exist per (workshop, student) pair, so registering again after cancelling returns 409.",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already registered (DUPLICATE_REGISTRATION)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(workshop_id, student_id = auth_user.user_id))]
pub async fn register_for_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(workshop_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("workshop:register")?;

    let model = registration_service(&state.db)
        .register(workshop_id, auth_user.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}/registrations",
    tag = "Workshop Registrations",
    operation_id = "listWorkshopRegistrations",
    summary = "List a workshop's registrations",
    description = "Requires `workshop:manage` permission. Ordered by registration date.",
    params(("id" = i32, Path, description = "Workshop ID"), RegistrationListQuery),
    responses(
        (status = 200, description = "Registrations", body = RegistrationListResponse),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(workshop_id))]
pub async fn list_workshop_registrations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(workshop_id): Path<i32>,
    AppQuery(query): AppQuery<RegistrationListQuery>,
) -> Result<Json<RegistrationListResponse>, AppError> {
    auth_user.require_permission("workshop:manage")?;
    let status = parse_status_filter::<RegistrationStatus>(query.status.as_deref())?;
    let (page, per_page) = page_params(query.page, query.per_page);

    find_workshop(&state.db, workshop_id).await?;

    let (items, total) = registration_service(&state.db)
        .list_for_workshop(workshop_id, status, page, per_page)
        .await?;

    Ok(Json(RegistrationListResponse {
        data: items.into_iter().map(RegistrationResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

async fn find_workshop<C: ConnectionTrait>(db: &C, id: i32) -> Result<workshop::Model, AppError> {
    workshop::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}
