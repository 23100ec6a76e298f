use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Action encoding failed: {0}")]
    EncodeError(#[from] rmp_serde::encode::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Exchange rejected request: {0}")]
    Rejected(String),

    #[error("Asset {0} not found")]
    AssetNotFound(String),

    #[error("Order {0} is not open")]
    OrderNotFound(u64),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{failed} of {total} cancels failed (first error: {first_error})", total = .cancelled + .failed)]
    PartialCancel {
        cancelled: usize,
        failed: usize,
        first_error: String,
    },
}
