//! Financial Modeling Prep API client

use crate::error::{MarketError, Result};
use crate::types::{
    CashflowStatement, CompanyProfile, DividendEvent, EconomicEvent, IncomeStatement, KeyRatios,
    MarketMover, ScreenerFilter, ScreenerRow, SearchHit,
};
use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Financial Modeling Prep API client
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl FmpClient {
    /// Create a new FMP client with API key and rate limit
    ///
    /// # Arguments
    /// * `api_key` - FMP API key
    /// * `rate_limit` - Maximum requests per minute (free tier: 300/day,
    ///   so a low per-minute quota keeps bursts in check)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(60).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{BASE_URL}/{path}");
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("apikey", self.api_key.clone()));

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| MarketError::Unavailable(format!("FMP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Unavailable(format!(
                "FMP API error {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MarketError::MalformedResponse(format!("FMP payload: {e}")))
    }

    /// Company profile. Fails with `SymbolNotFound` for unknown symbols,
    /// which FMP reports as an empty array.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let rows: Vec<CompanyProfile> = self.get_json(&format!("profile/{symbol}"), &[]).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| MarketError::SymbolNotFound(symbol.to_string()))
    }

    /// Latest annual financial ratios, if FMP has them.
    pub async fn ratios(&self, symbol: &str) -> Result<Option<KeyRatios>> {
        let rows: Vec<KeyRatios> = self
            .get_json(&format!("ratios/{symbol}"), &[("limit", "1".to_string())])
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Latest annual income statement, if FMP has one.
    pub async fn income_statement(&self, symbol: &str) -> Result<Option<IncomeStatement>> {
        let rows: Vec<IncomeStatement> = self
            .get_json(
                &format!("income-statement/{symbol}"),
                &[("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Latest annual cash flow statement, if FMP has one.
    pub async fn cashflow_statement(&self, symbol: &str) -> Result<Option<CashflowStatement>> {
        let rows: Vec<CashflowStatement> = self
            .get_json(
                &format!("cash-flow-statement/{symbol}"),
                &[("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Full dividend payment history, newest first as FMP returns it.
    pub async fn dividend_history(&self, symbol: &str) -> Result<Vec<DividendEvent>> {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            historical: Vec<DividendEvent>,
        }

        let payload: Payload = self
            .get_json(&format!("historical-price-full/stock_dividend/{symbol}"), &[])
            .await?;
        Ok(payload.historical)
    }

    /// Stock screener with optional sector / max P:E / min dividend
    /// filters, capped at 100 rows.
    pub async fn screener(&self, filter: &ScreenerFilter) -> Result<Vec<ScreenerRow>> {
        let mut params = vec![("limit", "100".to_string())];
        if let Some(sector) = &filter.sector {
            params.push(("sector", sector.clone()));
        }
        if let Some(pe_max) = filter.pe_max {
            params.push(("priceEarningRatio", pe_max.to_string()));
        }
        if let Some(dividend_min) = filter.dividend_min {
            params.push(("dividendYield", dividend_min.to_string()));
        }
        self.get_json("stock-screener", &params).await
    }

    /// Companies listed in a country, capped at 20 rows.
    pub async fn companies_by_country(&self, country_code: &str) -> Result<Vec<ScreenerRow>> {
        let params = vec![
            ("country", country_code.to_uppercase()),
            ("limit", "20".to_string()),
        ];
        self.get_json("stock-screener", &params).await
    }

    /// Symbol search, capped at 10 hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let params = vec![("query", query.to_string()), ("limit", "10".to_string())];
        self.get_json("search", &params).await
    }

    /// Today's top gainers.
    pub async fn gainers(&self) -> Result<Vec<MarketMover>> {
        self.get_json("stock_market/gainers", &[]).await
    }

    /// Today's top losers.
    pub async fn losers(&self) -> Result<Vec<MarketMover>> {
        self.get_json("stock_market/losers", &[]).await
    }

    /// Economic calendar events between two dates (inclusive).
    pub async fn economic_calendar(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EconomicEvent>> {
        let params = vec![
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        self.get_json("economic_calendar", &params).await
    }
}
