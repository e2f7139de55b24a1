//! Authorization guard and role resolver.
//!
//! The guard maps an authenticated caller plus a requested action to
//! allow/deny and never mutates state. Roles are resolved fresh from the
//! record store on every check — the assertion cookie only proves the email.

use common::record::Role;
use common::store::RecordStore;

use crate::error::AppError;
use crate::extractors::auth::AuthUser;

/// Effective role for an email.
///
/// An absent User record is not an error: first-time identities that were
/// never upserted simply act as `user`.
pub async fn resolve_role(store: &dyn RecordStore, email: &str) -> Result<Role, AppError> {
    Ok(store
        .user_by_email(email)
        .await?
        .map(|user| user.role)
        .unwrap_or_default())
}

/// Deny unless the caller's resolved role is `admin`.
pub async fn require_admin(store: &dyn RecordStore, auth: &AuthUser) -> Result<(), AppError> {
    match resolve_role(store, &auth.email).await? {
        Role::Admin => Ok(()),
        _ => Err(AppError::PermissionDenied),
    }
}

/// Deny unless the caller's resolved role is `creator`.
pub async fn require_creator(store: &dyn RecordStore, auth: &AuthUser) -> Result<(), AppError> {
    match resolve_role(store, &auth.email).await? {
        Role::Creator => Ok(()),
        _ => Err(AppError::PermissionDenied),
    }
}

/// Deny unless the caller is a `creator` or an `admin`.
pub async fn require_creator_or_admin(
    store: &dyn RecordStore,
    auth: &AuthUser,
) -> Result<(), AppError> {
    match resolve_role(store, &auth.email).await? {
        Role::Creator | Role::Admin => Ok(()),
        Role::User => Err(AppError::PermissionDenied),
    }
}

/// Deny an owner-scoped action when the assertion email does not match the
/// resource owner.
pub fn require_self(auth: &AuthUser, owner_email: &str) -> Result<(), AppError> {
    if auth.email == owner_email {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}
