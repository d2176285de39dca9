//! Multi-series correlation endpoint

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use finanalyse_analysis::CorrelationReport;

#[derive(Debug, Deserialize)]
pub struct CorrelationQuery {
    tickers: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/correlation", get(correlation))
}

/// `GET /api/correlation?tickers=AAPL,MSFT,…`
///
/// At least two valid symbols must survive trimming/uppercasing and data
/// retrieval; otherwise 400. A provider outage answers 503 with no
/// partial result.
async fn correlation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CorrelationQuery>,
) -> Result<Json<CorrelationReport>, ApiError> {
    let report = state.analyzer.analyze(&query.tickers).await?;
    Ok(Json(report))
}
