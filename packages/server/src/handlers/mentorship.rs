use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use campus_common::MentorshipStatus;
use tracing::instrument;

use crate::entity::mentorship;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppQuery};
use crate::models::mentorship::*;
use crate::models::shared::{Pagination, page_params, parse_status_filter};
use crate::services::mentorship_service;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Mentorships",
    operation_id = "requestMentorship",
    summary = "Request mentorship from a mentor",
    description = "Creates a `pending` mentorship request from the caller to the given mentor. Requires `mentorship:request` permission. Only one request may exist per (mentor, student) pair; a second one returns 409 even if the first was answered.",
    request_body = CreateMentorshipRequest,
    responses(
        (status = 201, description = "Request created", body = MentorshipResponse),
        (status = 400, description = "Validation error, e.g. target is not a mentor (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Mentor not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already requested (DUPLICATE_REQUEST)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(mentor_id = payload.mentor_id, student_id = auth_user.user_id))]
pub async fn request_mentorship(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMentorshipRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("mentorship:request")?;

    let model = mentorship_service(&state.db)
        .create(payload.mentor_id, auth_user.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(MentorshipResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Mentorships",
    operation_id = "listMentorships",
    summary = "List the caller's mentorships",
    description = "With `role=student` (default) lists requests the caller sent; with `role=mentor` lists requests addressed to the caller. Newest first.",
    params(MentorshipListQuery),
    responses(
        (status = 200, description = "Mentorships", body = MentorshipListResponse),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_mentorships(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MentorshipListQuery>,
) -> Result<Json<MentorshipListResponse>, AppError> {
    let status = parse_status_filter::<MentorshipStatus>(query.status.as_deref())?;
    let (page, per_page) = page_params(query.page, query.per_page);
    let service = mentorship_service(&state.db);

    let (items, total) = match query.role.unwrap_or_default() {
        MentorshipParty::Mentor => {
            service
                .list_for_mentor(auth_user.user_id, status, page, per_page)
                .await?
        }
        MentorshipParty::Student => {
            service
                .list_for_student(auth_user.user_id, status, page, per_page)
                .await?
        }
    };

    Ok(Json(MentorshipListResponse {
        data: items.into_iter().map(MentorshipResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Mentorships",
    operation_id = "getMentorship",
    summary = "Get a mentorship",
    description = "Visible to its mentor, its student, and holders of `mentorship:manage`. Others get 404.",
    params(("id" = i32, Path, description = "Mentorship ID")),
    responses(
        (status = 200, description = "Mentorship", body = MentorshipResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_mentorship(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MentorshipResponse>, AppError> {
    let model = find_visible_mentorship(&state, &auth_user, id).await?;
    Ok(Json(MentorshipResponse::from(model)))
}

#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Mentorships",
    operation_id = "updateMentorshipStatus",
    summary = "Accept or reject a mentorship request",
    description = "Moves a `pending` request to `accepted` or `rejected`. Only the named mentor (or `mentorship:manage`) may answer. Answers are final: a second answer returns 409.",
    params(("id" = i32, Path, description = "Mentorship ID")),
    request_body = UpdateMentorshipStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MentorshipResponse),
        (status = 400, description = "Status is not `accepted` or `rejected` (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is the student, not the mentor (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already answered (INVALID_TRANSITION)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, status = %payload.status))]
pub async fn update_mentorship_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMentorshipStatusRequest>,
) -> Result<Json<MentorshipResponse>, AppError> {
    let new_status = parse_response_status(&payload.status)?;

    let existing = find_visible_mentorship(&state, &auth_user, id).await?;
    auth_user.require_self_or(existing.mentor_id, "mentorship:manage")?;

    let model = mentorship_service(&state.db)
        .update_status(id, new_status)
        .await?;

    Ok(Json(MentorshipResponse::from(model)))
}

/// Load a mentorship the caller is a party to. Hidden records look missing.
async fn find_visible_mentorship(
    state: &AppState,
    auth_user: &AuthUser,
    id: i32,
) -> Result<mentorship::Model, AppError> {
    let model = mentorship_service(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mentorship not found".into()))?;

    let is_party = auth_user.user_id == model.mentor_id || auth_user.user_id == model.student_id;
    if is_party || auth_user.has_permission("mentorship:manage") {
        Ok(model)
    } else {
        Err(AppError::NotFound("Mentorship not found".into()))
    }
}
