//! Error types for market data access

use thiserror::Error;

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Tagged error kinds for provider access
///
/// Callers match on these instead of inspecting exception text: a symbol
/// with no data is dropped or turned into a 404, while a provider outage
/// is surfaced as a retryable-by-caller failure.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The provider has no data at all for the symbol
    #[error("symbol '{0}' not found or has no data")]
    SymbolNotFound(String),

    /// Transport-level failure or provider outage
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but the payload could not be interpreted
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The feature needs an API key that is not configured
    #[error("API key for {0} is not configured")]
    MissingApiKey(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::SymbolNotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "symbol 'ZZZZ' not found or has no data");

        let err = MarketError::MissingApiKey("FMP");
        assert_eq!(err.to_string(), "API key for FMP is not configured");
    }
}
