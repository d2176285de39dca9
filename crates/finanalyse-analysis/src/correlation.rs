//! Pairwise Pearson correlation over an aligned table

use crate::align::AlignedTable;

/// Symmetric correlation matrix over the table's symbol columns.
///
/// Correlation is computed on raw aligned closing prices, not returns.
/// That is a known statistical weakness (trends produce spurious
/// correlation) carried over deliberately to match the source system's
/// observable behavior.
///
/// A cell is `None` when the coefficient is undefined, i.e. one of the
/// two columns has zero variance over the window.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    symbols: Vec<String>,
    cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Compute the matrix for every pair of columns in the table.
    ///
    /// Only the upper triangle is computed; the lower triangle is its
    /// mirror. The diagonal is 1.0 by definition rather than by
    /// computation, which would divide zero by zero on a constant column.
    pub fn compute(table: &AlignedTable) -> Self {
        let symbols = table.symbols().to_vec();
        let n = symbols.len();
        let mut cells = vec![vec![None; n]; n];

        for i in 0..n {
            cells[i][i] = Some(1.0);
            let Some(x) = table.column(&symbols[i]) else {
                continue;
            };
            for j in (i + 1)..n {
                let Some(y) = table.column(&symbols[j]) else {
                    continue;
                };
                let r = pearson(x, y);
                cells[i][j] = r;
                cells[j][i] = r;
            }
        }

        Self { symbols, cells }
    }

    /// Symbols in retained order; rows and columns follow this order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Cell at (row, column) index; `None` marks an undefined
    /// coefficient.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells[row][column]
    }
}

/// Pearson correlation coefficient between two equal-length sequences.
///
/// Returns `None` when either sequence has zero variance (the
/// coefficient is undefined there) or when the sequences are too short.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
