use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::TOKEN_COOKIE;
use crate::extractors::json::AppJson;
use crate::models::auth::{TokenRequest, TokenResponse, validate_token_request};
use crate::state::AppState;
use crate::utils::jwt;

/// Issue an identity assertion cookie for an email.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    operation_id = "issueToken",
    summary = "Issue an identity assertion cookie",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Cookie set", body = TokenResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<TokenRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    validate_token_request(&payload)?;

    let email = payload.email.trim();
    let token = jwt::sign(
        email,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    // Cross-site cookie: the frontend lives on another origin.
    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::hours(state.config.auth.token_ttl_hours))
        .build();

    Ok((jar.add(cookie), Json(TokenResponse { success: true })))
}

/// Clear the identity assertion cookie.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Clear the identity assertion cookie",
    responses(
        (status = 200, description = "Cookie cleared", body = TokenResponse),
    ),
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<TokenResponse>) {
    let removal = Cookie::build((TOKEN_COOKIE, "")).path("/").build();
    (jar.remove(removal), Json(TokenResponse { success: true }))
}
