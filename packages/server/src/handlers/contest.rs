use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::record::{Contest, ContestStatus, Winner};
use common::store::RecordStore;
use tracing::instrument;
use uuid::Uuid;

use crate::authz;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::contest::*;
use crate::state::AppState;

/// Number of entries returned by the top-contests ranking.
const TOP_CONTESTS_LIMIT: usize = 5;
/// Number of entries returned by the top-winner ranking.
const TOP_WINNERS_LIMIT: usize = 3;

/// Sentinel category filter meaning "no filter".
const ALL_CATEGORIES: &str = "all";

#[utoipa::path(
    post,
    path = "/contests",
    tag = "Contests",
    operation_id = "createContest",
    summary = "Create a new contest",
    description = "Creates a contest in `draft` with zero participants and no winner. Requires the `creator` or `admin` role.",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContestRequest>,
) -> Result<impl IntoResponse, AppError> {
    authz::require_creator_or_admin(state.store.as_ref(), &auth_user).await?;
    validate_create_contest(&payload)?;

    let contest = Contest {
        id: Uuid::new_v4(),
        name: payload.name.trim().to_string(),
        description: payload.description,
        category: payload.category.trim().to_string(),
        creator_email: auth_user.email,
        fee: payload.fee,
        deadline: payload.deadline,
        participants_count: 0,
        status: ContestStatus::Draft,
        winner: None,
        created_at: Utc::now(),
    };
    state.store.insert_contest(contest.clone()).await?;

    Ok((StatusCode::CREATED, Json(ContestResponse::from(contest))))
}

#[utoipa::path(
    get,
    path = "/contests",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List contests, optionally filtered by category",
    description = "Public. `search` matches the category case-insensitively as a substring; the sentinel `All` (or no filter) returns everything.",
    params(ContestListQuery),
    responses(
        (status = 200, description = "List of contests", body = Vec<ContestResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_contests(
    State(state): State<AppState>,
    Query(query): Query<ContestListQuery>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let mut contests = state.store.list_contests().await?;

    if let Some(term) = query.search.as_deref().map(str::trim)
        && !term.is_empty()
        && !term.eq_ignore_ascii_case(ALL_CATEGORIES)
    {
        let needle = term.to_lowercase();
        contests.retain(|contest| contest.category.to_lowercase().contains(&needle));
    }

    contests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(contests.into_iter().map(ContestResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Fetch one contest",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContestResponse>, AppError> {
    let contest = find_contest(state.store.as_ref(), id).await?;
    Ok(Json(contest.into()))
}

#[utoipa::path(
    delete,
    path = "/contests/{id}",
    tag = "Contests",
    operation_id = "deleteContest",
    summary = "Delete a contest",
    description = "Admin only. Registrations referencing the contest are left in place.",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 204, description = "Contest deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    authz::require_admin(state.store.as_ref(), &auth_user).await?;

    if !state.store.delete_contest(id).await? {
        return Err(AppError::NotFound("Contest not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/contests/{id}",
    tag = "Contests",
    operation_id = "reconcileParticipants",
    summary = "Reconcile the participant count",
    description = "Re-derives `participants_count` from the registration collection. Idempotent; used by the registration flow to repair a failed count update.",
    params(("id" = Uuid, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Count reconciled", body = ReconcileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn reconcile_participants(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReconcileResponse>, AppError> {
    let participants_count = state.registrations.reconcile_count(id).await?;
    Ok(Json(ReconcileResponse {
        id,
        participants_count,
    }))
}

#[utoipa::path(
    get,
    path = "/top-contests",
    tag = "Contests",
    operation_id = "topContests",
    summary = "Top contests by participant count",
    responses(
        (status = 200, description = "At most five contests, most participants first", body = Vec<ContestResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn top_contests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let mut contests = state.store.list_contests().await?;
    contests.sort_by(|a, b| b.participants_count.cmp(&a.participants_count));
    contests.truncate(TOP_CONTESTS_LIMIT);
    Ok(Json(contests.into_iter().map(ContestResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/top-winner",
    tag = "Contests",
    operation_id = "topWinners",
    summary = "Top declared winners by contest participant count",
    responses(
        (status = 200, description = "At most three winner entries, biggest contest first", body = Vec<TopWinnerEntry>),
    ),
)]
#[instrument(skip(state))]
pub async fn top_winners(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopWinnerEntry>>, AppError> {
    let mut contests: Vec<Contest> = state
        .store
        .list_contests()
        .await?
        .into_iter()
        .filter(|contest| contest.winner.is_some())
        .collect();
    contests.sort_by(|a, b| b.participants_count.cmp(&a.participants_count));
    contests.truncate(TOP_WINNERS_LIMIT);

    let entries = contests
        .into_iter()
        .filter_map(|contest| {
            contest.winner.map(|winner| TopWinnerEntry {
                contest_id: contest.id,
                contest_name: contest.name,
                participants_count: contest.participants_count,
                winner,
            })
        })
        .collect();
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/my-created-contests",
    tag = "Contests",
    operation_id = "myCreatedContests",
    summary = "List contests created by the caller",
    params(MyContestsQuery),
    responses(
        (status = 200, description = "The caller's contests", body = Vec<ContestResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Creator mismatch (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn my_created_contests(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<MyContestsQuery>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    authz::require_self(&auth_user, query.creator.trim())?;

    let mut contests: Vec<Contest> = state
        .store
        .list_contests()
        .await?
        .into_iter()
        .filter(|contest| contest.creator_email == auth_user.email)
        .collect();
    contests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(contests.into_iter().map(ContestResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/my-created-contests/{id}",
    tag = "Contests",
    operation_id = "declareWinner",
    summary = "Declare the contest winner",
    description = "Owner-scoped creator action. All three winner fields are written as one value, exactly once; the winner must be a registered participant and the contest must have left `draft`.",
    params(("id" = Uuid, Path, description = "Contest ID")),
    request_body = DeclareWinnerRequest,
    responses(
        (status = 200, description = "Winner declared", body = ContestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Winner already declared or contest still draft (CONFLICT)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn declare_winner(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<DeclareWinnerRequest>,
) -> Result<Json<ContestResponse>, AppError> {
    authz::require_creator(state.store.as_ref(), &auth_user).await?;
    validate_declare_winner(&payload)?;

    let contest = find_contest(state.store.as_ref(), id).await?;
    authz::require_self(&auth_user, &contest.creator_email)?;

    if contest.status == ContestStatus::Draft {
        return Err(AppError::Conflict(
            "Winner cannot be declared before publication".into(),
        ));
    }
    if contest.winner.is_some() {
        return Err(AppError::Conflict("Winner already declared".into()));
    }

    let winner_email = payload.winner_email.trim();
    let is_registrant = state
        .store
        .registrations_by_contest(id)
        .await?
        .iter()
        .any(|registration| registration.email == winner_email);
    if !is_registrant {
        return Err(AppError::Validation(
            "Winner must be a registered participant".into(),
        ));
    }

    let updated = state
        .store
        .set_contest_winner(
            id,
            Winner {
                name: payload.winner_name.trim().to_string(),
                email: winner_email.to_string(),
                image_url: payload.winner_image.trim().to_string(),
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    tracing::info!(contest_id = %id, winner = %winner_email, "winner declared");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/admin-contests/{id}",
    tag = "Contests",
    operation_id = "setContestStatus",
    summary = "Set the contest lifecycle status",
    description = "Admin only. The value must belong to the closed status set; unrecognized values are rejected.",
    params(("id" = Uuid, Path, description = "Contest ID")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ContestResponse),
        (status = 400, description = "Unrecognized status (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("cookie" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn set_contest_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<SetStatusRequest>,
) -> Result<Json<ContestResponse>, AppError> {
    authz::require_admin(state.store.as_ref(), &auth_user).await?;

    let status: ContestStatus = payload.status.trim().parse()?;
    let updated = state
        .store
        .set_contest_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

    Ok(Json(updated.into()))
}

async fn find_contest(store: &dyn RecordStore, id: Uuid) -> Result<Contest, AppError> {
    store
        .contest_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}
