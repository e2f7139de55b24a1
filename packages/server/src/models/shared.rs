use crate::error::AppError;

/// Validate an email address (trimmed, single `@`, no whitespace, ≤ 254
/// characters). Deliberately shallow — the identity provider owns real
/// verification.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let well_formed = email.len() <= 254
        && !email.contains(char::is_whitespace)
        && email.split('@').filter(|part| !part.is_empty()).count() == 2;
    if !well_formed {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    Ok(())
}

/// Validate a trimmed display name (1-256 Unicode characters).
pub fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 256 {
        return Err(AppError::Validation("Name must be 1-256 characters".into()));
    }
    Ok(())
}
