use async_trait::async_trait;
use uuid::Uuid;

use super::error::StoreError;
use crate::record::{Contest, ContestStatus, Registration, Role, User, Winner};

/// Outcome of an idempotent upsert-by-email.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Identifier of the record now holding the email.
    pub id: Uuid,
    /// `false` when the email was already present and nothing was written.
    pub inserted: bool,
}

/// Document store over the Users, Contests, and Registrations collections.
///
/// Implementations own all durable state; callers never cache reads. All
/// mutating operations must be safe under concurrent requests — in
/// particular [`increment_participants`](RecordStore::increment_participants)
/// must be atomic with respect to other increments on the same contest.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Users ---

    /// Insert the user unless the email is already present.
    ///
    /// Atomic: two concurrent upserts for the same email result in exactly
    /// one stored record, with the loser observing `inserted: false`.
    async fn upsert_user(&self, user: User) -> Result<UpsertOutcome, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Set the stored role. Returns the updated record, or `None` if the id
    /// is unknown.
    async fn set_user_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError>;

    /// Returns `true` if a record was deleted.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    // --- Contests ---

    async fn insert_contest(&self, contest: Contest) -> Result<Uuid, StoreError>;

    async fn contest_by_id(&self, id: Uuid) -> Result<Option<Contest>, StoreError>;

    async fn list_contests(&self) -> Result<Vec<Contest>, StoreError>;

    async fn delete_contest(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn set_contest_status(
        &self,
        id: Uuid,
        status: ContestStatus,
    ) -> Result<Option<Contest>, StoreError>;

    /// Write the winner value in a single update.
    async fn set_contest_winner(
        &self,
        id: Uuid,
        winner: Winner,
    ) -> Result<Option<Contest>, StoreError>;

    /// Atomically add one to the participant count, returning the new count.
    async fn increment_participants(&self, id: Uuid) -> Result<Option<u64>, StoreError>;

    /// Overwrite the participant count with a server-derived value.
    ///
    /// Reconciliation-only: the value must come from counting the
    /// registration collection, never from a client-observed read.
    async fn set_participants_count(
        &self,
        id: Uuid,
        count: u64,
    ) -> Result<Option<Contest>, StoreError>;

    // --- Registrations ---

    async fn insert_registration(&self, registration: Registration) -> Result<Uuid, StoreError>;

    async fn registrations_by_email(&self, email: &str) -> Result<Vec<Registration>, StoreError>;

    async fn registrations_by_contest(
        &self,
        contest_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError>;
}
