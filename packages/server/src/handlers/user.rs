use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::record::{Role, User};
use common::store::RecordStore;
use tracing::instrument;
use uuid::Uuid;

use crate::authz;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::user::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    operation_id = "upsertUser",
    summary = "Create a user on first sign-in",
    description = "Idempotent by email. An existing email returns the stored record's id with `inserted: false` and writes nothing.",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "User created", body = UpsertUserResponse),
        (status = 200, description = "Email already present, nothing written", body = UpsertUserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn upsert_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_upsert_user(&payload)?;

    let outcome = state
        .store
        .upsert_user(User {
            id: Uuid::new_v4(),
            email: payload.email.trim().to_string(),
            name: payload.name.trim().to_string(),
            photo_url: payload.photo_url,
            role: Role::default(),
            created_at: Utc::now(),
        })
        .await?;

    let status = if outcome.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(UpsertUserResponse {
            id: outcome.id,
            inserted: outcome.inserted,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    authz::require_admin(state.store.as_ref(), &auth_user).await?;

    let mut users = state.store.list_users().await?;
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    authz::require_admin(state.store.as_ref(), &auth_user).await?;

    if !state.store.delete_user(id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    operation_id = "updateUserRole",
    summary = "Change a user's role",
    description = "Admin only. The role must belong to the closed set; unrecognized values are rejected.",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Unrecognized role (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_user_role(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    authz::require_admin(state.store.as_ref(), &auth_user).await?;

    let role: Role = payload.role.trim().parse()?;
    let updated = state
        .store
        .set_user_role(id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    tracing::info!(user_id = %id, role = %role, "role updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    get,
    path = "/users/role/{email}",
    tag = "Users",
    operation_id = "getUserRole",
    summary = "Read the caller's effective role",
    description = "Self-scoped: the path email must match the authenticated caller. Unknown emails resolve to `user`.",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Effective role", body = RoleResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Email mismatch (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_user_role(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    authz::require_self(&auth_user, email.trim())?;

    let role = authz::resolve_role(state.store.as_ref(), &auth_user.email).await?;
    Ok(Json(RoleResponse { role }))
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Users",
    operation_id = "leaderboard",
    summary = "Users ranked by contests won",
    responses(
        (status = 200, description = "All users, most wins first", body = Vec<LeaderboardEntry>),
    ),
)]
#[instrument(skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let users = state.store.list_users().await?;
    let contests = state.store.list_contests().await?;

    let mut wins: HashMap<String, u64> = HashMap::new();
    for contest in &contests {
        if let Some(winner) = &contest.winner {
            *wins.entry(winner.email.clone()).or_default() += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = users
        .into_iter()
        .map(|user| LeaderboardEntry {
            wins: wins.get(&user.email).copied().unwrap_or(0),
            email: user.email,
            name: user.name,
            photo_url: user.photo_url,
        })
        .collect();
    entries.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.email.cmp(&b.email)));

    Ok(Json(entries))
}
