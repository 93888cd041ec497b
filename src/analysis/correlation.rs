use std::fmt;

use crate::data::model::{Capabilities, CellValue, Column, Dataset};

use super::summary::{format_number, write_table};

/// Pearson correlation between every pair of numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` × `columns.len()`.
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationOutcome {
    Matrix(CorrelationMatrix),
    NotEnoughNumericData,
}

impl CorrelationMatrix {
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        Some(self.values[i][j])
    }
}

/// Correlate all numeric columns, or report that there are fewer than two.
pub fn correlate(dataset: &Dataset, caps: &Capabilities) -> CorrelationOutcome {
    if !caps.can_correlate() {
        return CorrelationOutcome::NotEnoughNumericData;
    }

    let numeric: Vec<&Column> = dataset.numeric_columns().collect();
    let n = numeric.len();
    let mut values = vec![vec![1.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let r = pearson(&numeric[i].cells, &numeric[j].cells);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationOutcome::Matrix(CorrelationMatrix {
        columns: numeric.iter().map(|c| c.name.clone()).collect(),
        values,
    })
}

/// Pearson r over the rows where both cells hold a number.
/// NaN with fewer than two such rows or when either side is constant.
fn pearson(a: &[CellValue], b: &[CellValue]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let rows: Vec<(&str, Vec<String>)> = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, row)| (name.as_str(), row.iter().map(|v| format_number(*v)).collect()))
            .collect();
        write_table(f, &headers, &rows)
    }
}
