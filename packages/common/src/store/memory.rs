use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use async_trait::async_trait;

use super::error::StoreError;
use super::traits::{RecordStore, UpsertOutcome};
use crate::record::{Contest, ContestStatus, Registration, Role, User, Winner};

/// In-memory record store.
///
/// The reference backend: collections are concurrent maps, and the email
/// index entry lock makes upsert-by-email atomic. Increment operations take
/// the per-key exclusive guard, so concurrent registrations on the same
/// contest serialize instead of losing updates.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    user_emails: DashMap<String, Uuid>,
    contests: DashMap<Uuid, Contest>,
    registrations: DashMap<Uuid, Registration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn upsert_user(&self, user: User) -> Result<UpsertOutcome, StoreError> {
        match self.user_emails.entry(user.email.clone()) {
            Entry::Occupied(existing) => Ok(UpsertOutcome {
                id: *existing.get(),
                inserted: false,
            }),
            Entry::Vacant(slot) => {
                let id = user.id;
                self.users.insert(id, user);
                slot.insert(id);
                Ok(UpsertOutcome { id, inserted: true })
            }
        }
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.user_emails.get(email).map(|entry| *entry) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn set_user_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError> {
        Ok(self.users.get_mut(&id).map(|mut entry| {
            entry.role = role;
            entry.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.user_emails.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_contest(&self, contest: Contest) -> Result<Uuid, StoreError> {
        let id = contest.id;
        self.contests.insert(id, contest);
        Ok(id)
    }

    async fn contest_by_id(&self, id: Uuid) -> Result<Option<Contest>, StoreError> {
        Ok(self.contests.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_contests(&self) -> Result<Vec<Contest>, StoreError> {
        Ok(self.contests.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete_contest(&self, id: Uuid) -> Result<bool, StoreError> {
        // Registrations referencing the contest are left in place.
        Ok(self.contests.remove(&id).is_some())
    }

    async fn set_contest_status(
        &self,
        id: Uuid,
        status: ContestStatus,
    ) -> Result<Option<Contest>, StoreError> {
        Ok(self.contests.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.clone()
        }))
    }

    async fn set_contest_winner(
        &self,
        id: Uuid,
        winner: Winner,
    ) -> Result<Option<Contest>, StoreError> {
        Ok(self.contests.get_mut(&id).map(|mut entry| {
            entry.winner = Some(winner);
            entry.status = ContestStatus::WinnerDeclared;
            entry.clone()
        }))
    }

    async fn increment_participants(&self, id: Uuid) -> Result<Option<u64>, StoreError> {
        Ok(self.contests.get_mut(&id).map(|mut entry| {
            entry.participants_count += 1;
            entry.participants_count
        }))
    }

    async fn set_participants_count(
        &self,
        id: Uuid,
        count: u64,
    ) -> Result<Option<Contest>, StoreError> {
        Ok(self.contests.get_mut(&id).map(|mut entry| {
            entry.participants_count = count;
            entry.clone()
        }))
    }

    async fn insert_registration(&self, registration: Registration) -> Result<Uuid, StoreError> {
        let id = registration.id;
        self.registrations.insert(id, registration);
        Ok(id)
    }

    async fn registrations_by_email(&self, email: &str) -> Result<Vec<Registration>, StoreError> {
        Ok(self
            .registrations
            .iter()
            .filter(|entry| entry.email == email)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn registrations_by_contest(
        &self,
        contest_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError> {
        Ok(self
            .registrations
            .iter()
            .filter(|entry| entry.contest_id == contest_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}
