use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::store::RecordStore;
use tracing::instrument;
use uuid::Uuid;

use crate::authz;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::registration::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/registered-contests",
    tag = "Registrations",
    operation_id = "recordRegistration",
    summary = "Record a registration after payment",
    description = "Self-scoped: the registration email must match the caller. Inserts the registration and bumps the participant count atomically on the store. Settlement of the referenced intent is not verified here.",
    request_body = RecordRegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = RegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Email mismatch (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Store failure (UPSTREAM_FAILURE)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(contest_id = %payload.contest_id))]
pub async fn record_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<RecordRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_record_registration(&payload)?;
    let email = payload.email.trim();
    authz::require_self(&auth_user, email)?;

    let registration = state
        .registrations
        .register(payload.contest_id, email, payload.payment_ref.trim().to_string())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    ))
}

#[utoipa::path(
    get,
    path = "/registered-contests/{email}",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List registrations for an email",
    description = "Self-scoped. Without `sort`, returns every registration. `sort=deadline` returns only registrations whose deadline is still ahead, soonest first.",
    params(
        ("email" = String, Path, description = "Registrant email"),
        RegistrationListQuery,
    ),
    responses(
        (status = 200, description = "Registrations", body = Vec<RegistrationResponse>),
        (status = 400, description = "Unrecognized sort mode (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Email mismatch (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_registrations(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<RegistrationListQuery>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    let email = email.trim();
    authz::require_self(&auth_user, email)?;

    let registrations = match query.sort.as_deref() {
        None => state.registrations.registrations_for(email).await?,
        Some("deadline") => state.registrations.upcoming_registrations_for(email).await?,
        Some(other) => {
            return Err(AppError::Validation(format!(
                "Invalid sort '{other}'. Valid values: deadline"
            )));
        }
    };

    Ok(Json(
        registrations.into_iter().map(RegistrationResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/submission/{id}",
    tag = "Registrations",
    operation_id = "contestRegistrations",
    summary = "List registrations for a contest",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Registrations for the contest", body = Vec<RegistrationResponse>),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn contest_registrations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationResponse>>, AppError> {
    if state.store.contest_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Contest not found".into()));
    }

    let mut registrations = state.store.registrations_by_contest(id).await?;
    registrations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(Json(
        registrations.into_iter().map(RegistrationResponse::from).collect(),
    ))
}
