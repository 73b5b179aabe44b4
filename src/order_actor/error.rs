use thiserror::Error;

/// Errors that can occur while placing or reading orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Please login to place order")]
    NotAuthenticated,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Please select a delivery address")]
    MissingAddress,
    #[error("Invalid delivery address: {0}")]
    InvalidAddress(String),
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),
    #[error("Cart unavailable: {0}")]
    CartUnavailable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
