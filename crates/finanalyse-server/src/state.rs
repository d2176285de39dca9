//! Shared application state

use crate::config::ServerConfig;
use crate::error::ApiError;
use finanalyse_analysis::CorrelationAnalyzer;
use finanalyse_assistant::{AssistantError, FinanceAssistant, GeminiClient, InMemorySessionStore};
use finanalyse_market::{FmpClient, MarketError, MarketauxClient, YahooMarketClient};
use std::sync::Arc;

/// Shared application state, passed to all route handlers via
/// `axum::extract::State`.
///
/// Keyed clients are `Option`s: a missing API key leaves the client
/// unconstructed and the accessor answers with the 503 the frontend
/// expects.
pub struct AppState {
    pub config: ServerConfig,
    pub yahoo: Arc<YahooMarketClient>,
    pub analyzer: CorrelationAnalyzer,
    pub fmp: Option<FmpClient>,
    pub marketaux: Option<MarketauxClient>,
    pub assistant: Option<FinanceAssistant>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let yahoo = Arc::new(YahooMarketClient::new());
        let analyzer = CorrelationAnalyzer::new(yahoo.clone());

        let fmp = config
            .fmp_api_key
            .as_ref()
            .map(|key| FmpClient::new(key.as_str(), config.fmp_rate_limit));
        if fmp.is_none() {
            tracing::warn!("FMP_API_KEY not set: fundamentals, screener and calendar disabled");
        }

        let marketaux = config
            .marketaux_api_key
            .as_ref()
            .map(|key| MarketauxClient::new(key.as_str(), config.marketaux_rate_limit));
        if marketaux.is_none() {
            tracing::warn!("MARKETAUX_API_KEY not set: news disabled");
        }

        let assistant = config.google_api_key.as_ref().map(|key| {
            tracing::info!("Google API key found, AI assistant enabled");
            let sessions = Arc::new(InMemorySessionStore::new(
                config.session_ttl_secs,
                config.session_capacity,
            ));
            FinanceAssistant::new(GeminiClient::new(key.as_str()), sessions)
        });
        if assistant.is_none() {
            tracing::warn!("GOOGLE_API_KEY not set: AI assistant disabled");
        }

        Arc::new(Self {
            config,
            yahoo,
            analyzer,
            fmp,
            marketaux,
            assistant,
        })
    }

    pub fn fmp(&self) -> Result<&FmpClient, ApiError> {
        self.fmp
            .as_ref()
            .ok_or_else(|| MarketError::MissingApiKey("Financial Modeling Prep").into())
    }

    pub fn marketaux(&self) -> Result<&MarketauxClient, ApiError> {
        self.marketaux
            .as_ref()
            .ok_or_else(|| MarketError::MissingApiKey("Marketaux").into())
    }

    pub fn assistant(&self) -> Result<&FinanceAssistant, ApiError> {
        self.assistant
            .as_ref()
            .ok_or_else(|| AssistantError::Disabled.into())
    }
}
