//! Market data provider adapters
//!
//! This crate wraps the third-party data sources the backend aggregates:
//!
//! - Yahoo Finance for daily price history (the collaborator the
//!   correlation pipeline depends on, behind [`PriceHistoryProvider`])
//! - Financial Modeling Prep for company profiles, ratios, financial
//!   statements, dividends, the screener, symbol search, market movers
//!   and the economic calendar
//! - Marketaux for market news
//!
//! Every provider payload is mapped to an explicit record type with
//! `Option` fields at the adapter boundary, so downstream code never has
//! to guess whether a field is present. Failures are tagged
//! [`MarketError`] kinds: "this symbol has no data" and "the provider is
//! down" are different conditions and callers handle them differently.

pub mod error;
pub mod fmp;
pub mod marketaux;
pub mod provider;
pub mod types;
pub mod yahoo;

pub use error::{MarketError, Result};
pub use fmp::FmpClient;
pub use marketaux::MarketauxClient;
pub use provider::PriceHistoryProvider;
pub use types::{Lookback, PricePoint, PriceSeries};
pub use yahoo::YahooMarketClient;
