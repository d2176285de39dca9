//! Market-wide passthrough endpoints

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use finanalyse_market::types::{EconomicEvent, MarketMover, ScreenerFilter, ScreenerRow, SearchHit};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/news", get(news))
        .route("/api/screener", get(screener))
        .route("/api/search", get(search))
        .route("/api/companies-by-country/{country_code}", get(companies_by_country))
        .route("/api/gainers", get(gainers))
        .route("/api/losers", get(losers))
        .route("/api/economic-calendar", get(economic_calendar))
}

async fn news(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let client = state.marketaux()?;
    let articles = client.latest_news().await?;
    Ok(Json(json!({ "articles": articles })))
}

// ── Screener ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenerQuery {
    sector: Option<String>,
    pe_max: Option<f64>,
    dividend_min: Option<f64>,
}

/// Row shape the frontend table binds to.
#[derive(Debug, Serialize)]
struct ScreenerResult {
    symbol: Option<String>,
    name: Option<String>,
    pe: Option<f64>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<f64>,
}

impl From<ScreenerRow> for ScreenerResult {
    fn from(row: ScreenerRow) -> Self {
        Self {
            symbol: row.symbol,
            name: row.company_name,
            pe: row.price_earning_ratio,
            dividend_yield: row.dividend_yield,
        }
    }
}

async fn screener(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScreenerQuery>,
) -> Result<Json<Value>, ApiError> {
    let fmp = state.fmp()?;
    let filter = ScreenerFilter {
        sector: query.sector,
        pe_max: query.pe_max,
        dividend_min: query.dividend_min,
    };

    let rows = fmp.screener(&filter).await?;
    let results: Vec<ScreenerResult> = rows.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "results": results })))
}

// ── Search and per-country listing ───────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let fmp = state.fmp()?;
    Ok(Json(fmp.search(&params.query).await?))
}

async fn companies_by_country(
    State(state): State<Arc<AppState>>,
    Path(country_code): Path<String>,
) -> Result<Json<Vec<ScreenerRow>>, ApiError> {
    let fmp = state.fmp()?;
    Ok(Json(fmp.companies_by_country(&country_code).await?))
}

// ── Movers and calendar ──────────────────────────────────────────────────

async fn gainers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MarketMover>>, ApiError> {
    let fmp = state.fmp()?;
    Ok(Json(fmp.gainers().await?))
}

async fn losers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MarketMover>>, ApiError> {
    let fmp = state.fmp()?;
    Ok(Json(fmp.losers().await?))
}

/// Events for the week ahead.
async fn economic_calendar(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EconomicEvent>>, ApiError> {
    let fmp = state.fmp()?;
    let today = Utc::now().date_naive();
    let next_week = today + Duration::days(7);
    Ok(Json(fmp.economic_calendar(today, next_week).await?))
}
