//! Error types for the correlation pipeline

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Fatal failures of the correlation pipeline.
///
/// A symbol without data is not an error at this level: it is dropped,
/// and only matters once fewer than two usable symbols remain. An
/// undefined correlation cell is not an error at all; it is carried in
/// the matrix as an explicit empty cell.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Fewer than two symbols survived parsing and data retrieval
    #[error("need at least two usable symbols: {usable} of {requested} requested had data")]
    InsufficientSymbols { requested: usize, usable: usize },

    /// The underlying provider failed at the transport level
    #[error("market data provider unavailable: {0}")]
    ProviderUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::InsufficientSymbols {
            requested: 3,
            usable: 1,
        };
        assert_eq!(
            err.to_string(),
            "need at least two usable symbols: 1 of 3 requested had data"
        );
    }
}
