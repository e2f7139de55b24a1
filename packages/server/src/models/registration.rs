use chrono::{DateTime, Utc};
use common::record::Registration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::validate_email;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RecordRegistrationRequest {
    pub contest_id: Uuid,
    pub email: String,
    /// Payment intent id obtained from the payment step.
    pub payment_ref: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct RegistrationListQuery {
    /// `deadline` returns only upcoming registrations ordered by deadline;
    /// absent returns everything.
    pub sort: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub email: String,
    pub deadline: DateTime<Utc>,
    pub payment_ref: String,
    pub created_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(m: Registration) -> Self {
        Self {
            id: m.id,
            contest_id: m.contest_id,
            email: m.email,
            deadline: m.deadline,
            payment_ref: m.payment_ref,
            created_at: m.created_at,
        }
    }
}

pub fn validate_record_registration(req: &RecordRegistrationRequest) -> Result<(), AppError> {
    validate_email(&req.email)?;
    if req.payment_ref.trim().is_empty() {
        return Err(AppError::Validation("Payment reference is required".into()));
    }
    Ok(())
}
