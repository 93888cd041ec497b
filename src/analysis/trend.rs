use crate::data::model::{Capabilities, Column, Dataset, VALUE, YEAR};

/// Least-squares slope of Value on Year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendCoefficient(pub f64);

impl TrendCoefficient {
    pub fn slope(&self) -> f64 {
        self.0
    }

    /// Slope rounded to two decimals, as displayed.
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome {
    Coefficient(TrendCoefficient),
    /// Year or Value column is absent.
    ColumnsRequired,
    /// Both columns exist but can't be fitted.
    Unavailable(String),
}

/// Fit `Value = a + b·Year` by ordinary least squares and keep `b`.
pub fn fit_trend(dataset: &Dataset, caps: &Capabilities) -> TrendOutcome {
    if !caps.can_fit_trend() {
        return TrendOutcome::ColumnsRequired;
    }
    let (Some(year), Some(value)) = (dataset.column(YEAR), dataset.column(VALUE)) else {
        return TrendOutcome::ColumnsRequired;
    };

    match paired_values(year, value) {
        Ok((xs, ys)) => TrendOutcome::Coefficient(TrendCoefficient(ols_slope(&xs, &ys))),
        Err(reason) => TrendOutcome::Unavailable(reason),
    }
}

fn paired_values(year: &Column, value: &Column) -> Result<(Vec<f64>, Vec<f64>), String> {
    for col in [year, value] {
        if !col.kind.is_numeric() {
            return Err(format!("column '{}' is not numeric", col.name));
        }
        if col.count() != col.cells.len() {
            return Err(format!("column '{}' has missing values", col.name));
        }
    }
    let xs = year.numeric_values();
    let ys = value.numeric_values();
    if xs.is_empty() {
        return Err("dataset has no rows".to_string());
    }
    Ok((xs, ys))
}

/// Minimum-norm solution: a constant x gives a slope of zero.
fn ols_slope(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    if sxx == 0.0 { 0.0 } else { sxy / sxx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, ColumnKind};

    fn int_column(name: &str, values: &[i64]) -> Column {
        Column {
            name: name.into(),
            kind: ColumnKind::Integer,
            cells: values.iter().map(|v| CellValue::Integer(*v)).collect(),
        }
    }

    fn fit(columns: Vec<Column>) -> TrendOutcome {
        let rows = columns.first().map_or(0, |c| c.cells.len());
        let ds = Dataset::new(columns, rows);
        let caps = Capabilities::detect(&ds);
        fit_trend(&ds, &caps)
    }

    #[test]
    fn slope_of_evenly_spaced_values() {
        let outcome = fit(vec![
            int_column("Year", &[2000, 2001, 2002]),
            int_column("Value", &[10, 12, 14]),
        ]);
        let TrendOutcome::Coefficient(c) = outcome else {
            panic!("expected a coefficient, got {outcome:?}");
        };
        assert_eq!(c.rounded(), 2.0);
        assert_eq!(format!("{:.2}", c.slope()), "2.00");
    }

    #[test]
    fn noisy_slope_is_rounded_to_two_decimals() {
        let TrendOutcome::Coefficient(c) = fit(vec![
            int_column("Year", &[1, 2, 3, 4]),
            int_column("Value", &[1, 3, 2, 5]),
        ]) else {
            panic!("expected a coefficient");
        };
        assert!((c.slope() - 1.1).abs() < 1e-12);
        assert_eq!(c.rounded(), 1.1);
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let outcome = fit(vec![
            int_column("year", &[2000, 2001]),
            int_column("Value", &[1, 2]),
        ]);
        assert_eq!(outcome, TrendOutcome::ColumnsRequired);
    }

    #[test]
    fn missing_value_column_requires_columns() {
        let outcome = fit(vec![int_column("Year", &[2000, 2001])]);
        assert_eq!(outcome, TrendOutcome::ColumnsRequired);
    }

    #[test]
    fn text_value_column_is_unavailable() {
        let value = Column {
            name: "Value".into(),
            kind: ColumnKind::Text,
            cells: vec![CellValue::String("high".into()), CellValue::String("low".into())],
        };
        let outcome = fit(vec![int_column("Year", &[2000, 2001]), value]);
        assert!(matches!(outcome, TrendOutcome::Unavailable(reason) if reason.contains("Value")));
    }

    #[test]
    fn constant_year_has_zero_slope() {
        let TrendOutcome::Coefficient(c) = fit(vec![
            int_column("Year", &[2000, 2000, 2000]),
            int_column("Value", &[1, 5, 9]),
        ]) else {
            panic!("expected a coefficient");
        };
        assert_eq!(c.slope(), 0.0);
    }
}
