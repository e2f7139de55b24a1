//! Registration coordinator.
//!
//! Sequences a registration attempt through `Requested → IntentCreated →
//! Recorded → CountUpdated`. There is no cross-step transaction: an intent
//! abandoned after a gateway success moves no funds, and a registration whose
//! count increment fails stays valid until the reconciliation pass repairs
//! the counter. Settlement is never verified before recording — confirmation
//! happens out-of-band between the client and the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::payment::{PaymentGateway, PaymentIntent};
use common::record::Registration;
use common::store::RecordStore;
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::error::AppError;

/// Convert a fee in major currency units to integer minor units (fee × 100,
/// truncated).
pub fn fee_to_minor_units(fee: f64) -> Result<i64, AppError> {
    if !fee.is_finite() || fee <= 0.0 {
        return Err(AppError::Validation("Fee must be a positive amount".into()));
    }
    Ok((fee * 100.0) as i64)
}

pub struct RegistrationCoordinator {
    store: Arc<dyn RecordStore>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
    call_timeout: Duration,
}

impl RegistrationCoordinator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        gateway: Arc<dyn PaymentGateway>,
        config: &PaymentConfig,
    ) -> Self {
        Self {
            store,
            gateway,
            currency: config.currency.clone(),
            call_timeout: Duration::from_millis(config.call_timeout_ms),
        }
    }

    /// Bound an upstream call with the configured timeout budget.
    async fn bounded<T, E>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::Upstream(format!("{what} call timed out"))),
        }
    }

    /// `Requested → IntentCreated`: ask the gateway for an intent covering
    /// the fee. A failure here leaves no durable state behind.
    pub async fn create_intent(&self, fee: f64) -> Result<PaymentIntent, AppError> {
        let amount_minor = fee_to_minor_units(fee)?;
        let intent = self
            .bounded(
                "payment gateway",
                self.gateway.create_intent(amount_minor, &self.currency),
            )
            .await?;
        tracing::info!(intent = %intent.id, amount_minor, "payment intent created");
        Ok(intent)
    }

    /// `Recorded → CountUpdated`: insert the registration, then atomically
    /// bump the participant count.
    ///
    /// The contest is re-read first so no registration is ever created
    /// against a missing contest id. A count-increment failure after the
    /// insert does not fail the attempt: the registration stands and the
    /// counter is repaired by [`reconcile_count`](Self::reconcile_count).
    pub async fn register(
        &self,
        contest_id: Uuid,
        email: &str,
        payment_ref: String,
    ) -> Result<Registration, AppError> {
        let contest = self
            .bounded("record store", self.store.contest_by_id(contest_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

        let registration = Registration {
            id: Uuid::new_v4(),
            contest_id,
            email: email.to_string(),
            deadline: contest.deadline,
            payment_ref,
            created_at: Utc::now(),
        };
        self.bounded(
            "record store",
            self.store.insert_registration(registration.clone()),
        )
        .await?;

        match self
            .bounded("record store", self.store.increment_participants(contest_id))
            .await
        {
            Ok(Some(count)) => {
                tracing::debug!(%contest_id, count, "participant count updated");
            }
            Ok(None) => {
                tracing::warn!(%contest_id, "contest disappeared before count update");
            }
            Err(err) => {
                tracing::warn!(
                    %contest_id,
                    registration = %registration.id,
                    error = %err,
                    "participant count update failed, reconciliation required"
                );
            }
        }

        Ok(registration)
    }

    /// Re-derive the participant count from the registration collection.
    ///
    /// Idempotent: safe to call any number of times, from the HTTP surface or
    /// a background pass.
    pub async fn reconcile_count(&self, contest_id: Uuid) -> Result<u64, AppError> {
        let registrations = self
            .bounded(
                "record store",
                self.store.registrations_by_contest(contest_id),
            )
            .await?;
        let count = registrations.len() as u64;

        self.bounded(
            "record store",
            self.store.set_participants_count(contest_id, count),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))?;

        Ok(count)
    }

    /// All registrations for an email, in store order.
    pub async fn registrations_for(&self, email: &str) -> Result<Vec<Registration>, AppError> {
        self.bounded("record store", self.store.registrations_by_email(email))
            .await
    }

    /// Registrations for an email whose deadline has not passed, soonest
    /// first.
    pub async fn upcoming_registrations_for(
        &self,
        email: &str,
    ) -> Result<Vec<Registration>, AppError> {
        let now = Utc::now();
        let mut registrations = self.registrations_for(email).await?;
        registrations.retain(|registration| registration.deadline >= now);
        registrations.sort_by_key(|registration| registration.deadline);
        Ok(registrations)
    }
}
