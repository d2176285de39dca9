//! Price history provider abstraction

use crate::error::Result;
use crate::types::{Lookback, PriceSeries};
use async_trait::async_trait;

/// Source of daily closing prices for the analysis pipeline.
///
/// This is the only interface the correlation core requires of a market
/// data backend. Implementations return
/// [`MarketError::SymbolNotFound`](crate::MarketError::SymbolNotFound)
/// when the provider has no data at all for the symbol and
/// [`MarketError::Unavailable`](crate::MarketError::Unavailable) on
/// transport failure. Failed fetches are never retried here; the caller
/// decides what a failure means.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetch daily closes for `symbol` over the lookback window,
    /// oldest first.
    async fn daily_closes(&self, symbol: &str, lookback: Lookback) -> Result<PriceSeries>;
}
