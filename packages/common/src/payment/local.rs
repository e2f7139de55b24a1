use async_trait::async_trait;
use rand::Rng;

use super::error::PaymentError;
use super::traits::{PaymentGateway, PaymentIntent};

/// Process-local payment gateway.
///
/// Mints intent ids and client secrets without talking to a processor.
/// Intents carry no funds movement, so abandoning one is always safe.
#[derive(Default)]
pub struct LocalGateway;

impl LocalGateway {
    pub fn new() -> Self {
        Self
    }
}

fn random_token() -> String {
    let bytes: [u8; 12] = rand::rng().random();
    hex::encode(bytes)
}

#[async_trait]
impl PaymentGateway for LocalGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount_minor <= 0 {
            return Err(PaymentError::Rejected(format!(
                "amount must be positive, got {amount_minor}"
            )));
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(PaymentError::Rejected(format!(
                "unsupported currency '{currency}'"
            )));
        }

        let id = format!("pi_{}", random_token());
        let client_secret = format!("{}_secret_{}", id, random_token());
        tracing::debug!(intent = %id, amount_minor, currency, "created payment intent");

        Ok(PaymentIntent {
            id,
            client_secret,
            amount_minor,
            currency: currency.to_string(),
        })
    }
}
