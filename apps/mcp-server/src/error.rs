use hyperliquid_sdk::SdkError;
use thiserror::Error;

pub type ToolResult<T> = Result<T, ToolError>;

/// Failure of a single tool call
#[derive(Debug, Error)]
pub enum ToolError {
    /// Bad arguments, rejected before any network call
    #[error("{0}")]
    InvalidArgument(String),

    /// Market data the call depends on is missing
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Sdk(#[from] SdkError),
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidArgument(message.into())
    }
}
