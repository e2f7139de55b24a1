use serde::{Deserialize, Serialize};

use super::shared::validate_email;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct TokenRequest {
    /// Email the assertion is bound to.
    pub email: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub success: bool,
}

pub fn validate_token_request(req: &TokenRequest) -> Result<(), AppError> {
    validate_email(&req.email)
}
