use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role assigned to users that have never been granted anything else.
pub const DEFAULT_ROLE: Role = Role::User;

/// Effective role of a user.
///
/// Deserialization is deliberately lenient: a stored document carrying a role
/// outside the closed set maps to [`Role::User`] instead of failing the read.
/// Boundary input (role-change requests) must go through [`Role::from_str`],
/// which rejects unrecognized values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Creator,
    Admin,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(DEFAULT_ROLE))
    }
}

impl Role {
    /// All recognized role values.
    pub const ALL: &'static [Role] = &[Self::User, Self::Creator, Self::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Creator => "creator",
            Self::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        DEFAULT_ROLE
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "creator" => Ok(Self::Creator),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseEnumError::new("role", s, Role::ALL.iter().map(|r| r.as_str()))),
        }
    }
}

/// Lifecycle tag of a contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContestStatus {
    Draft,
    Published,
    Closed,
    WinnerDeclared,
}

impl ContestStatus {
    /// All recognized status values.
    pub const ALL: &'static [ContestStatus] =
        &[Self::Draft, Self::Published, Self::Closed, Self::WinnerDeclared];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
            Self::WinnerDeclared => "winner_declared",
        }
    }
}

impl Default for ContestStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "closed" => Ok(Self::Closed),
            "winner_declared" => Ok(Self::WinnerDeclared),
            _ => Err(ParseEnumError::new(
                "status",
                s,
                ContestStatus::ALL.iter().map(|v| v.as_str()),
            )),
        }
    }
}

/// Error when parsing an enum value supplied at an API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    field: &'static str,
    invalid: String,
    valid: String,
}

impl ParseEnumError {
    fn new<'a>(
        field: &'static str,
        invalid: &str,
        valid: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            field,
            invalid: invalid.to_string(),
            valid: valid.collect::<Vec<_>>().join(", "),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.field, self.invalid, self.valid
        )
    }
}

impl std::error::Error for ParseEnumError {}

/// A platform user, keyed by email.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Declared winner of a contest. Holding all three fields in one value keeps
/// the all-or-nothing invariant structural.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Winner {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// A hosted contest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Contest {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub creator_email: String,
    /// Entry fee in major currency units.
    pub fee: f64,
    pub deadline: DateTime<Utc>,
    pub participants_count: u64,
    pub status: ContestStatus,
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
}

/// A paid registration binding a user to a contest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub email: String,
    /// Copy of the contest deadline at registration time, kept for sorted
    /// upcoming-obligation queries.
    pub deadline: DateTime<Utc>,
    pub payment_ref: String,
    pub created_at: DateTime<Utc>,
}
