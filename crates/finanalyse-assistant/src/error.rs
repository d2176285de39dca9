//! Error types for the assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Assistant failures
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The assistant is not configured (no API key)
    #[error("the AI assistant is disabled on this server")]
    Disabled,

    /// Upstream model API failure
    #[error("AI communication error: {0}")]
    Api(String),
}
