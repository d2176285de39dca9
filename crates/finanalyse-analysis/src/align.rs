//! Multi-series date alignment and gap filling

use chrono::NaiveDate;
use finanalyse_market::types::PriceSeries;
use std::collections::{BTreeSet, HashMap};

/// Price data for several symbols reindexed onto one shared, ascending
/// date axis.
///
/// After construction every retained column is fully filled: no column
/// has a missing value anywhere on the date axis, and a symbol with no
/// observations at all is not retained.
#[derive(Debug, Clone)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl AlignedTable {
    /// Build the table from raw per-symbol series.
    ///
    /// The date axis is the union of all observed dates, sorted
    /// ascending. Symbols whose series is empty are dropped; the
    /// survivors keep their input order. Each surviving column is
    /// reindexed onto the axis, forward-filled, then backward-filled for
    /// leading gaps.
    ///
    /// Filling treats non-trading-day gaps as "no price change", which
    /// biases correlation on sparse data slightly toward 1.0. That
    /// approximation is inherited from the source system and accepted.
    pub fn build(series: &[PriceSeries]) -> Self {
        let mut date_set: BTreeSet<NaiveDate> = BTreeSet::new();
        for s in series {
            for p in &s.points {
                date_set.insert(p.date);
            }
        }
        let dates: Vec<NaiveDate> = date_set.into_iter().collect();

        let mut symbols = Vec::with_capacity(series.len());
        let mut columns = HashMap::with_capacity(series.len());
        for s in series {
            if s.points.is_empty() {
                continue;
            }
            let by_date: HashMap<NaiveDate, f64> =
                s.points.iter().map(|p| (p.date, p.close)).collect();
            let mut column: Vec<Option<f64>> =
                dates.iter().map(|d| by_date.get(d).copied()).collect();
            fill_gaps(&mut column);

            let filled: Vec<f64> = column.into_iter().flatten().collect();
            debug_assert_eq!(filled.len(), dates.len());

            symbols.push(s.symbol.clone());
            columns.insert(s.symbol.clone(), filled);
        }

        Self {
            dates,
            symbols,
            columns,
        }
    }

    /// Shared date axis, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Retained symbols, in input order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// A symbol's fully-filled column, same length as [`dates`](Self::dates).
    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    /// Number of retained symbol columns.
    pub fn width(&self) -> usize {
        self.symbols.len()
    }
}

/// Forward-fill each missing slot from the nearest prior value, then
/// backward-fill any still-missing leading slots from the first
/// observation.
fn fill_gaps(column: &mut [Option<f64>]) {
    let mut last = None;
    for slot in column.iter_mut() {
        match *slot {
            Some(v) => last = Some(v),
            None => *slot = last,
        }
    }

    let mut next = None;
    for slot in column.iter_mut().rev() {
        match *slot {
            Some(v) => next = Some(v),
            None => *slot = next,
        }
    }
}
