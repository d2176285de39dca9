//! Correlation analysis orchestration

use crate::align::AlignedTable;
use crate::correlation::CorrelationMatrix;
use crate::error::{AnalysisError, Result};
use crate::normalize;
use crate::report::CorrelationReport;
use crate::symbols::parse_tickers;
use finanalyse_market::provider::PriceHistoryProvider;
use finanalyse_market::types::{Lookback, PriceSeries};
use finanalyse_market::MarketError;
use futures::future::join_all;
use std::sync::Arc;

/// Drives the correlation pipeline against a price history provider.
///
/// Per-symbol fetches run concurrently, so total latency is bounded by
/// the slowest single fetch rather than the sum. A symbol the provider
/// does not know is dropped; a transport failure aborts the whole
/// request immediately, with no retry and no partial result.
pub struct CorrelationAnalyzer {
    provider: Arc<dyn PriceHistoryProvider>,
    lookback: Lookback,
}

impl CorrelationAnalyzer {
    /// Create an analyzer with the default one-year lookback.
    pub fn new(provider: Arc<dyn PriceHistoryProvider>) -> Self {
        Self {
            provider,
            lookback: Lookback::ONE_YEAR,
        }
    }

    /// Override the lookback window.
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Run the full pipeline for a comma-separated ticker list.
    pub async fn analyze(&self, tickers: &str) -> Result<CorrelationReport> {
        let symbols = parse_tickers(tickers);
        let requested = symbols.len();
        if requested < 2 {
            return Err(AnalysisError::InsufficientSymbols {
                requested,
                usable: requested,
            });
        }

        let fetches = symbols
            .iter()
            .map(|symbol| self.provider.daily_closes(symbol, self.lookback));
        let results = join_all(fetches).await;

        let mut series: Vec<PriceSeries> = Vec::with_capacity(requested);
        for (symbol, result) in symbols.iter().zip(results) {
            match result {
                Ok(s) if !s.is_empty() => series.push(s),
                Ok(_) | Err(MarketError::SymbolNotFound(_)) => {
                    tracing::debug!(%symbol, "no usable data, dropping symbol");
                }
                Err(err) => return Err(AnalysisError::ProviderUnavailable(err.to_string())),
            }
        }

        if series.len() < 2 {
            return Err(AnalysisError::InsufficientSymbols {
                requested,
                usable: series.len(),
            });
        }

        let table = AlignedTable::build(&series);
        let matrix = CorrelationMatrix::compute(&table);
        let normalized = normalize::rebase(&table);

        Ok(CorrelationReport::assemble(&table, &matrix, &normalized))
    }
}
