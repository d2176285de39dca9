//! Yahoo Finance market data client

use crate::error::{MarketError, Result};
use crate::provider::PriceHistoryProvider;
use crate::types::{Lookback, PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client for daily price history.
///
/// Requires no API key. The underlying connector is constructed per call.
#[derive(Debug, Clone, Default)]
pub struct YahooMarketClient {}

impl YahooMarketClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| MarketError::Unavailable(e.to_string()))
    }

    /// Daily closing prices over the lookback window, oldest first.
    ///
    /// One close per calendar day; days without a quote are absent from
    /// the result rather than zero-filled.
    pub async fn history(&self, symbol: &str, lookback: Lookback) -> Result<PriceSeries> {
        let provider = Self::connector()?;

        let end = Utc::now();
        let start = end - chrono::Duration::days(i64::from(lookback.days));

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::Unavailable(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::Unavailable(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| classify_error(symbol, &e))?;

        let quotes = response.quotes().map_err(|e| classify_error(symbol, &e))?;

        if quotes.is_empty() {
            return Err(MarketError::SymbolNotFound(symbol.to_string()));
        }

        let mut points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|ts| PricePoint {
                    date: ts.date_naive(),
                    close: q.close,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);

        tracing::debug!(%symbol, points = points.len(), "fetched daily closes");
        Ok(PriceSeries::new(symbol, points))
    }
}

/// Yahoo answers unknown symbols with an HTTP 404 on the chart endpoint
/// or an empty quote set; everything else is a transport failure.
fn classify_error(symbol: &str, err: &yahoo::YahooError) -> MarketError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("404") || lowered.contains("not found") || lowered.contains("empty") {
        MarketError::SymbolNotFound(symbol.to_string())
    } else {
        MarketError::Unavailable(message)
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooMarketClient {
    async fn daily_closes(&self, symbol: &str, lookback: Lookback) -> Result<PriceSeries> {
        self.history(symbol, lookback).await
    }
}
