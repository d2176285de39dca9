//! Rescaling aligned series to a common 100-point base

use crate::align::AlignedTable;

/// Rescale every column so the first aligned row equals exactly 100.
///
/// The base is the first row of the *aligned* table, not each symbol's
/// own first observation. Leading gaps were already backward-filled by
/// the aligner, so every retained series starts at 100 on the same date.
/// Returned in the table's retained symbol order.
pub fn rebase(table: &AlignedTable) -> Vec<(String, Vec<f64>)> {
    table
        .symbols()
        .iter()
        .filter_map(|symbol| {
            let column = table.column(symbol)?;
            let base = *column.first()?;
            let rescaled = column.iter().map(|v| v / base * 100.0).collect();
            Some((symbol.clone(), rescaled))
        })
        .collect()
}
