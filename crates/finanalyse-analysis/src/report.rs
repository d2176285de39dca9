//! Assembly of the correlation response payload

use crate::align::AlignedTable;
use crate::correlation::CorrelationMatrix;
use serde::Serialize;
use serde_json::{Map, Value};

/// The external JSON contract of the correlation endpoint.
///
/// Pure data reshaping, no computation. Symbol keys follow the retained
/// order on both axes so identical inputs serialize to identical output.
/// Undefined correlation cells become JSON `null` (NaN is not
/// representable in JSON).
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub correlation_matrix: Map<String, Value>,
    pub normalized_prices: NormalizedPrices,
}

/// Rescaled series over the shared date axis.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPrices {
    pub dates: Vec<String>,
    pub series: Map<String, Value>,
}

impl CorrelationReport {
    /// Merge the matrix and the rescaled series into the response shape.
    pub fn assemble(
        table: &AlignedTable,
        matrix: &CorrelationMatrix,
        normalized: &[(String, Vec<f64>)],
    ) -> Self {
        let mut correlation_matrix = Map::new();
        for (i, row_symbol) in matrix.symbols().iter().enumerate() {
            let mut row = Map::new();
            for (j, column_symbol) in matrix.symbols().iter().enumerate() {
                let cell = match matrix.get(i, j) {
                    Some(r) => Value::from(r),
                    None => Value::Null,
                };
                row.insert(column_symbol.clone(), cell);
            }
            correlation_matrix.insert(row_symbol.clone(), Value::Object(row));
        }

        let dates = table
            .dates()
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        let mut series = Map::new();
        for (symbol, values) in normalized {
            series.insert(symbol.clone(), Value::from(values.clone()));
        }

        Self {
            correlation_matrix,
            normalized_prices: NormalizedPrices { dates, series },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use chrono::NaiveDate;
    use finanalyse_market::types::{PricePoint, PriceSeries};

    fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap(),
                    close,
                })
                .collect(),
        )
    }

    fn report_for(input: &[PriceSeries]) -> CorrelationReport {
        let table = AlignedTable::build(input);
        let matrix = CorrelationMatrix::compute(&table);
        let normalized = normalize::rebase(&table);
        CorrelationReport::assemble(&table, &matrix, &normalized)
    }

    #[test]
    fn test_contract_shape() {
        let report = report_for(&[
            series("AAPL", &[100.0, 102.0, 101.0, 103.0, 104.0]),
            series("MSFT", &[50.0, 51.0, 49.0, 52.0, 53.0]),
        ]);

        let json = serde_json::to_value(&report).unwrap();
        assert!((json["correlation_matrix"]["AAPL"]["MSFT"].as_f64().unwrap() - 0.9).abs() < 1e-12);
        assert_eq!(json["correlation_matrix"]["AAPL"]["AAPL"], 1.0);
        assert_eq!(
            json["normalized_prices"]["dates"][0].as_str().unwrap(),
            "2025-01-01"
        );
        assert_eq!(json["normalized_prices"]["series"]["AAPL"][0], 100.0);
    }

    #[test]
    fn test_key_order_follows_retained_order() {
        let report = report_for(&[
            series("MSFT", &[50.0, 51.0]),
            series("AAPL", &[100.0, 102.0]),
        ]);

        let keys: Vec<&String> = report.correlation_matrix.keys().collect();
        assert_eq!(keys, ["MSFT", "AAPL"]);
        let keys: Vec<&String> = report.normalized_prices.series.keys().collect();
        assert_eq!(keys, ["MSFT", "AAPL"]);
    }

    #[test]
    fn test_undefined_cell_serializes_as_null() {
        let report = report_for(&[
            series("A", &[100.0, 102.0, 101.0]),
            series("FLAT", &[7.0, 7.0, 7.0]),
        ]);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["correlation_matrix"]["A"]["FLAT"].is_null());
        assert_eq!(json["correlation_matrix"]["FLAT"]["FLAT"], 1.0);
    }

    #[test]
    fn test_identical_output_for_identical_input() {
        let input = [
            series("AAPL", &[100.0, 102.0, 101.0]),
            series("MSFT", &[50.0, 51.0, 49.0]),
        ];
        let first = serde_json::to_string(&report_for(&input)).unwrap();
        let second = serde_json::to_string(&report_for(&input)).unwrap();
        assert_eq!(first, second);
    }
}
