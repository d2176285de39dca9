//! Per-ticker lookup endpoints

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use finanalyse_assistant::CompanyFigures;
use finanalyse_market::types::{DividendEvent, Lookback};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/entreprise/{ticker}", get(company))
        .route("/api/historique/{ticker}", get(history))
        .route("/api/advanced-metrics/{ticker}", get(advanced_metrics))
        .route("/api/dividends/{ticker}", get(dividends))
}

fn normalize(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

// ── Company overview ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyResponse {
    name: String,
    symbol: String,
    #[serde(rename = "logo_url")]
    logo_url: String,
    sector: String,
    country: String,
    price: Option<f64>,
    revenue: Option<f64>,
    net_income: Option<f64>,
    pe_ratio: Option<f64>,
    roe: Option<f64>,
    net_margin: Option<f64>,
    dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis_comment: Option<String>,
}

async fn company(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let fmp = state.fmp()?;
    let symbol = normalize(&ticker);

    let profile = fmp.profile(&symbol).await?;
    let (ratios, income) = tokio::join!(fmp.ratios(&symbol), fmp.income_statement(&symbol));
    let ratios = ratios?;
    let income = income?;

    let name = profile.company_name.unwrap_or_else(|| symbol.clone());
    let response = CompanyResponse {
        name: name.clone(),
        symbol: profile.symbol.unwrap_or_else(|| symbol.clone()),
        logo_url: profile.image.unwrap_or_default(),
        sector: profile.sector.unwrap_or_else(|| "N/A".to_string()),
        country: profile.country.unwrap_or_else(|| "N/A".to_string()),
        price: profile.price,
        revenue: income.as_ref().and_then(|i| i.revenue),
        net_income: income.as_ref().and_then(|i| i.net_income),
        pe_ratio: ratios.as_ref().and_then(|r| r.price_earnings_ratio),
        roe: ratios.as_ref().and_then(|r| r.return_on_equity),
        net_margin: ratios.as_ref().and_then(|r| r.net_profit_margin),
        dividend_yield: ratios.as_ref().and_then(|r| r.dividend_yield),
        analysis_comment: None,
    };

    let analysis_comment = match &state.assistant {
        Some(assistant) => {
            let figures = CompanyFigures {
                name,
                price: response.price,
                revenue: response.revenue,
                net_income: response.net_income,
                pe_ratio: response.pe_ratio,
                roe: response.roe,
                net_margin: response.net_margin,
            };
            match assistant.analysis_comment(&figures).await {
                Ok(comment) => Some(comment),
                Err(err) => {
                    tracing::warn!(%symbol, "analysis comment unavailable: {err}");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(CompanyResponse {
        analysis_comment,
        ..response
    }))
}

// ── Price history ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct HistoryResponse {
    dates: Vec<String>,
    prices: Vec<f64>,
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let symbol = normalize(&ticker);
    let series = state.yahoo.history(&symbol, Lookback::ONE_YEAR).await?;

    Ok(Json(HistoryResponse {
        dates: series
            .points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect(),
        prices: series.points.iter().map(|p| p.close).collect(),
    }))
}

// ── Advanced metrics ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedMetricsResponse {
    current_ratio: Option<f64>,
    quick_ratio: Option<f64>,
    debt_to_equity: Option<f64>,
    interest_coverage: Option<f64>,
    free_cash_flow: Option<f64>,
    dividend_yield: Option<f64>,
}

async fn advanced_metrics(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<AdvancedMetricsResponse>, ApiError> {
    let fmp = state.fmp()?;
    let symbol = normalize(&ticker);

    // Existence probe first, so an unknown symbol answers 404 instead of
    // a response full of nulls.
    let _ = fmp.profile(&symbol).await?;
    let (ratios, cashflow) = tokio::join!(fmp.ratios(&symbol), fmp.cashflow_statement(&symbol));
    let ratios = ratios?;
    let cashflow = cashflow?;

    Ok(Json(AdvancedMetricsResponse {
        current_ratio: ratios.as_ref().and_then(|r| r.current_ratio),
        quick_ratio: ratios.as_ref().and_then(|r| r.quick_ratio),
        debt_to_equity: ratios.as_ref().and_then(|r| r.debt_equity_ratio),
        interest_coverage: ratios.as_ref().and_then(|r| r.interest_coverage),
        free_cash_flow: cashflow.as_ref().and_then(|c| c.free_cash_flow()),
        dividend_yield: ratios.as_ref().and_then(|r| r.dividend_yield),
    }))
}

// ── Dividends ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DividendsResponse {
    dividend_rate: Option<f64>,
    payout_ratio: Option<f64>,
    dividend_history: DividendHistory,
}

#[derive(Debug, Serialize)]
struct DividendHistory {
    years: Vec<i32>,
    amounts: Vec<f64>,
}

async fn dividends(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<DividendsResponse>, ApiError> {
    let fmp = state.fmp()?;
    let symbol = normalize(&ticker);

    let _ = fmp.profile(&symbol).await?;
    let (ratios, events) = tokio::join!(fmp.ratios(&symbol), fmp.dividend_history(&symbol));
    let ratios = ratios?;
    let events = events?;

    let today = Utc::now().date_naive();
    let (years, amounts) = annual_dividends(&events, today);

    Ok(Json(DividendsResponse {
        dividend_rate: trailing_dividend_rate(&events, today),
        payout_ratio: ratios.as_ref().and_then(|r| r.payout_ratio),
        dividend_history: DividendHistory { years, amounts },
    }))
}

/// Sum dividend amounts per calendar year over the trailing five years,
/// ascending.
fn annual_dividends(events: &[DividendEvent], today: NaiveDate) -> (Vec<i32>, Vec<f64>) {
    let cutoff = today - Duration::days(5 * 365);
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for event in events {
        if event.date >= cutoff {
            if let Some(amount) = event.amount() {
                *by_year.entry(event.date.year()).or_insert(0.0) += amount;
            }
        }
    }
    by_year.into_iter().unzip()
}

/// Dividends paid over the trailing twelve months, the annualised rate.
fn trailing_dividend_rate(events: &[DividendEvent], today: NaiveDate) -> Option<f64> {
    let cutoff = today - Duration::days(365);
    let total: f64 = events
        .iter()
        .filter(|e| e.date >= cutoff)
        .filter_map(DividendEvent::amount)
        .sum();
    (total > 0.0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(y: i32, m: u32, d: u32, amount: f64) -> DividendEvent {
        DividendEvent {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            dividend: Some(amount),
            adj_dividend: Some(amount),
        }
    }

    #[test]
    fn test_annual_dividends_sums_per_year() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let events = vec![
            event(2024, 2, 9, 0.24),
            event(2024, 5, 10, 0.25),
            event(2023, 11, 10, 0.24),
            event(2023, 8, 11, 0.24),
        ];

        let (years, amounts) = annual_dividends(&events, today);
        assert_eq!(years, vec![2023, 2024]);
        assert!((amounts[0] - 0.48).abs() < 1e-12);
        assert!((amounts[1] - 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_annual_dividends_ignores_old_payments() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let events = vec![event(2015, 2, 9, 0.50), event(2024, 2, 9, 0.24)];

        let (years, _) = annual_dividends(&events, today);
        assert_eq!(years, vec![2024]);
    }

    #[test]
    fn test_trailing_dividend_rate() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let events = vec![
            event(2025, 2, 9, 0.25),
            event(2024, 11, 10, 0.25),
            event(2023, 2, 9, 0.24), // outside the window
        ];

        assert_eq!(trailing_dividend_rate(&events, today), Some(0.5));
        assert_eq!(trailing_dividend_rate(&[], today), None);
    }

    #[test]
    fn test_company_response_field_names() {
        let response = CompanyResponse {
            name: "Apple Inc.".to_string(),
            symbol: "AAPL".to_string(),
            logo_url: String::new(),
            sector: "Technology".to_string(),
            country: "US".to_string(),
            price: Some(227.5),
            revenue: None,
            net_income: Some(93_736_000_000.0),
            pe_ratio: Some(34.2),
            roe: None,
            net_margin: None,
            dividend_yield: None,
            analysis_comment: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["netIncome"], 93_736_000_000.0);
        assert_eq!(json["peRatio"], 34.2);
        assert!(json["revenue"].is_null());
        assert!(json.get("logo_url").is_some());
        // Absent comment is omitted entirely, not serialized as null.
        assert!(json.get("analysisComment").is_none());
    }
}
