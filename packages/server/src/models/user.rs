use chrono::{DateTime, Utc};
use common::record::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_email, validate_name};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpsertUserRequest {
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    /// One of `user`, `creator`, `admin`; anything else is rejected.
    pub role: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Result of the idempotent first-sign-in upsert. `inserted: false` is the
/// "no new row" marker for an email that already existed.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UpsertUserResponse {
    pub id: Uuid,
    pub inserted: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoleResponse {
    pub role: Role,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    /// Number of contests this user has won.
    pub wins: u64,
}

impl From<User> for UserResponse {
    fn from(m: User) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            photo_url: m.photo_url,
            role: m.role,
            created_at: m.created_at,
        }
    }
}

pub fn validate_upsert_user(req: &UpsertUserRequest) -> Result<(), AppError> {
    validate_email(&req.email)?;
    validate_name(&req.name)
}
