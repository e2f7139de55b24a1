use common::payment::PaymentIntent;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIntentRequest {
    /// Contest fee in major currency units.
    pub fee: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    /// Pass this as `payment_ref` when recording the registration.
    pub intent_id: String,
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: String,
}

impl From<PaymentIntent> for PaymentIntentResponse {
    fn from(m: PaymentIntent) -> Self {
        Self {
            intent_id: m.id,
            client_secret: m.client_secret,
            amount_minor: m.amount_minor,
            currency: m.currency,
        }
    }
}
