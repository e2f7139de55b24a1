use chrono::{DateTime, Utc};
use common::record::{Contest, ContestStatus, Winner};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_email, validate_name};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContestRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Entry fee in major currency units.
    pub fee: f64,
    pub deadline: DateTime<Utc>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContestListQuery {
    /// Case-insensitive category substring; `All` (or absent) disables the
    /// filter.
    pub search: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct MyContestsQuery {
    /// Creator email; must match the authenticated caller.
    pub creator: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeclareWinnerRequest {
    pub winner_name: String,
    pub winner_email: String,
    pub winner_image: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetStatusRequest {
    /// One of the closed status set; anything else is rejected.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContestResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub creator_email: String,
    pub fee: f64,
    pub deadline: DateTime<Utc>,
    pub participants_count: u64,
    pub status: ContestStatus,
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TopWinnerEntry {
    pub contest_id: Uuid,
    pub contest_name: String,
    pub participants_count: u64,
    pub winner: Winner,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReconcileResponse {
    pub id: Uuid,
    pub participants_count: u64,
}

impl From<Contest> for ContestResponse {
    fn from(m: Contest) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            category: m.category,
            creator_email: m.creator_email,
            fee: m.fee,
            deadline: m.deadline,
            participants_count: m.participants_count,
            status: m.status,
            winner: m.winner,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_contest(req: &CreateContestRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    if req.description.trim().is_empty() || req.description.len() > 10_000 {
        return Err(AppError::Validation(
            "Description must be non-empty and at most 10000 bytes".into(),
        ));
    }
    let category = req.category.trim();
    if category.is_empty() || category.chars().count() > 64 {
        return Err(AppError::Validation(
            "Category must be 1-64 characters".into(),
        ));
    }
    if !req.fee.is_finite() || req.fee <= 0.0 {
        return Err(AppError::Validation("Fee must be a positive amount".into()));
    }
    if req.deadline <= Utc::now() {
        return Err(AppError::Validation("Deadline must be in the future".into()));
    }
    Ok(())
}

pub fn validate_declare_winner(req: &DeclareWinnerRequest) -> Result<(), AppError> {
    validate_name(&req.winner_name)?;
    validate_email(&req.winner_email)?;
    if req.winner_image.trim().is_empty() {
        return Err(AppError::Validation("Winner image is required".into()));
    }
    Ok(())
}
