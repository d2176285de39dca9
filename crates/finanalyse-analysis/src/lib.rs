//! Multi-series correlation analysis
//!
//! The numerical core of the backend: given a set of requested ticker
//! symbols, fetch each symbol's daily closes from a
//! [`PriceHistoryProvider`](finanalyse_market::PriceHistoryProvider),
//! align the series onto a shared date axis, compute the pairwise Pearson
//! correlation matrix over the raw aligned prices, rescale every series to
//! a common 100-point base, and assemble the frontend JSON contract.
//!
//! The pipeline is stateless: every derived structure is created fresh per
//! request and discarded with the response. Nothing is cached or shared
//! across requests.

pub mod align;
pub mod correlation;
pub mod error;
pub mod normalize;
pub mod report;
pub mod service;
pub mod symbols;

pub use align::AlignedTable;
pub use correlation::CorrelationMatrix;
pub use error::{AnalysisError, Result};
pub use report::CorrelationReport;
pub use service::CorrelationAnalyzer;
pub use symbols::parse_tickers;
