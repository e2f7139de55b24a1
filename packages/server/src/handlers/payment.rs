use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::payment::{CreateIntentRequest, PaymentIntentResponse};
use crate::state::AppState;

/// Start a payment: convert the fee to minor units and ask the gateway for
/// an intent. Intentionally unauthenticated — the intent moves no funds and
/// the registration step is the guarded one.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    operation_id = "createPaymentIntent",
    summary = "Create a payment intent for a contest fee",
    request_body = CreateIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Gateway failure (UPSTREAM_FAILURE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(fee = payload.fee))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let intent = state.registrations.create_intent(payload.fee).await?;
    Ok(Json(intent.into()))
}
