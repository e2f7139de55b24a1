use thiserror::Error;

/// Errors that can occur while creating a payment intent.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway could not be reached.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
    /// The gateway refused the request.
    #[error("payment intent rejected: {0}")]
    Rejected(String),
}
