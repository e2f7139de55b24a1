use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;

/// A gateway-side authorized-but-unsettled charge.
///
/// The `client_secret` is handed to the caller to complete payment
/// out-of-band; the backend never observes settlement synchronously.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    /// Amount in minor currency units (e.g. cents).
    pub amount_minor: i64,
    pub currency: String,
}

/// Payment-intent provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for the given amount. Does not move funds.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}
