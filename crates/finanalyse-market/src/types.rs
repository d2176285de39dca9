//! Typed records for provider payloads
//!
//! Each record mirrors one provider response shape with explicit `Option`
//! fields, validated by serde at the adapter boundary. Field presence is
//! decided here, once, instead of being re-guessed by every caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Historical lookback window, in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookback {
    pub days: u32,
}

impl Lookback {
    /// One trading year of daily closes.
    pub const ONE_YEAR: Lookback = Lookback { days: 365 };
}

/// A single daily close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered daily closes for one symbol, oldest first.
///
/// Missing trading days are simply absent, never zero-filled. Owned
/// transiently per request and discarded with the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// FMP `/profile/{symbol}` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub price: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub exchange: Option<String>,
    pub image: Option<String>,
}

/// FMP `/ratios/{symbol}` record (latest annual period).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRatios {
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub debt_equity_ratio: Option<f64>,
    pub interest_coverage: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub net_profit_margin: Option<f64>,
    pub price_earnings_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
}

/// FMP `/income-statement/{symbol}` record (latest annual period).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
}

/// FMP `/cash-flow-statement/{symbol}` record (latest annual period).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowStatement {
    pub operating_cash_flow: Option<f64>,
    pub capital_expenditure: Option<f64>,
}

impl CashflowStatement {
    /// Free cash flow: operating cash flow plus capital expenditure
    /// (capital expenditure is reported as a negative outflow).
    ///
    /// `None` when either side is missing; never substitutes zero.
    pub fn free_cash_flow(&self) -> Option<f64> {
        match (self.operating_cash_flow, self.capital_expenditure) {
            (Some(op), Some(capex)) => Some(op + capex),
            _ => None,
        }
    }
}

/// One dividend payment from FMP's dividend history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    pub date: NaiveDate,
    pub dividend: Option<f64>,
    pub adj_dividend: Option<f64>,
}

impl DividendEvent {
    /// Prefer the raw dividend, falling back to the adjusted figure.
    pub fn amount(&self) -> Option<f64> {
        self.dividend.or(self.adj_dividend)
    }
}

/// Filter parameters for the stock screener.
#[derive(Debug, Clone, Default)]
pub struct ScreenerFilter {
    pub sector: Option<String>,
    pub pe_max: Option<f64>,
    pub dividend_min: Option<f64>,
}

/// FMP `/stock-screener` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerRow {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub exchange_short_name: Option<String>,
    pub price_earning_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// FMP `/stock_market/gainers` and `/losers` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMover {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub changes_percentage: Option<f64>,
}

/// FMP `/search` hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub stock_exchange: Option<String>,
    pub exchange_short_name: Option<String>,
}

/// FMP `/economic_calendar` entry. The `date` field is the provider's
/// own datetime string and is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    pub event: Option<String>,
    pub date: Option<String>,
    pub country: Option<String>,
    pub actual: Option<f64>,
    pub previous: Option<f64>,
    pub estimate: Option<f64>,
    pub impact: Option<String>,
}

/// Marketaux news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cash_flow() {
        let cashflow = CashflowStatement {
            operating_cash_flow: Some(110_543_000_000.0),
            capital_expenditure: Some(-10_959_000_000.0),
        };
        assert_eq!(cashflow.free_cash_flow(), Some(99_584_000_000.0));
    }

    #[test]
    fn test_free_cash_flow_missing_side() {
        let cashflow = CashflowStatement {
            operating_cash_flow: Some(1.0),
            capital_expenditure: None,
        };
        assert_eq!(cashflow.free_cash_flow(), None);

        let cashflow = CashflowStatement {
            operating_cash_flow: None,
            capital_expenditure: Some(-1.0),
        };
        assert_eq!(cashflow.free_cash_flow(), None);
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: CompanyProfile = serde_json::from_str(
            r#"{"symbol":"AAPL","companyName":"Apple Inc.","price":227.5,"sector":"Technology"}"#,
        )
        .unwrap();
        assert_eq!(profile.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(profile.price, Some(227.5));
        assert_eq!(profile.country, None);
        assert_eq!(profile.image, None);
    }

    #[test]
    fn test_ratios_field_names() {
        let ratios: KeyRatios = serde_json::from_str(
            r#"{
                "currentRatio": 0.98,
                "quickRatio": 0.94,
                "debtEquityRatio": 1.87,
                "interestCoverage": 29.1,
                "returnOnEquity": 1.56,
                "netProfitMargin": 0.25,
                "priceEarningsRatio": 34.2,
                "dividendYield": 0.0044,
                "payoutRatio": 0.15
            }"#,
        )
        .unwrap();
        assert_eq!(ratios.debt_equity_ratio, Some(1.87));
        assert_eq!(ratios.dividend_yield, Some(0.0044));
    }

    #[test]
    fn test_dividend_event_amount_fallback() {
        let event: DividendEvent =
            serde_json::from_str(r#"{"date":"2024-02-09","adjDividend":0.24}"#).unwrap();
        assert_eq!(event.dividend, None);
        assert_eq!(event.amount(), Some(0.24));
    }
}
