//! API error type and HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use finanalyse_analysis::AnalysisError;
use finanalyse_assistant::AssistantError;
use finanalyse_market::MarketError;
use serde_json::json;

/// Unified error type for API responses.
///
/// Status mapping: user errors (too few symbols, bad parameters) are
/// 400, an unknown symbol is 404, provider outages and missing API keys
/// are 503 (retryable by the caller), everything unexpected is 500.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::NotFound(msg) => write!(f, "not_found: {msg}"),
            Self::ServiceUnavailable(msg) => write!(f, "service_unavailable: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::SymbolNotFound(_) => Self::NotFound(err.to_string()),
            MarketError::Unavailable(_) | MarketError::MissingApiKey(_) => {
                Self::ServiceUnavailable(err.to_string())
            }
            MarketError::MalformedResponse(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InsufficientSymbols { .. } => Self::BadRequest(err.to_string()),
            AnalysisError::ProviderUnavailable(_) => Self::ServiceUnavailable(err.to_string()),
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Disabled => Self::ServiceUnavailable(err.to_string()),
            AssistantError::Api(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError::from(AnalysisError::InsufficientSymbols {
            requested: 1,
            usable: 1,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::from(MarketError::SymbolNotFound("ZZZZ".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiError::from(AnalysisError::ProviderUnavailable("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = ApiError::from(MarketError::Unavailable("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_assistant_disabled_maps_to_503() {
        let response = ApiError::from(AssistantError::Disabled).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
