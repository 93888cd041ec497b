use std::collections::HashMap;
use std::fmt;

use crate::data::model::{CellValue, Column, Dataset};

// ---------------------------------------------------------------------------
// Per-column statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN below two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalStats {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: ColumnStats,
}

/// Descriptive statistics for every column of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

/// Summarise every column: numeric columns get count/mean/std/min/quartiles/max,
/// all others get count/unique/top/freq.
pub fn describe(dataset: &Dataset) -> Summary {
    let columns = dataset
        .columns
        .iter()
        .map(|col| ColumnSummary {
            name: col.name.clone(),
            stats: if col.kind.is_numeric() {
                ColumnStats::Numeric(numeric_stats(col))
            } else {
                ColumnStats::Categorical(categorical_stats(col))
            },
        })
        .collect();
    Summary { columns }
}

fn numeric_stats(col: &Column) -> NumericStats {
    let mut values = col.numeric_values();
    values.sort_by(f64::total_cmp);
    let count = values.len();

    if count == 0 {
        return NumericStats {
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    NumericStats {
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        q50: quantile(&values, 0.50),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn categorical_stats(col: &Column) -> CategoricalStats {
    // value -> (frequency, first row seen)
    let mut freq: HashMap<&CellValue, (usize, usize)> = HashMap::new();
    for (row, cell) in col.cells.iter().enumerate() {
        if cell.is_null() {
            continue;
        }
        freq.entry(cell).or_insert((0, row)).0 += 1;
    }

    let top = freq
        .iter()
        .max_by(|(_, (fa, ra)), (_, (fb, rb))| fa.cmp(fb).then(rb.cmp(ra)))
        .map(|(value, (n, _))| (value.to_string(), *n));

    CategoricalStats {
        count: col.count(),
        unique: freq.len(),
        freq: top.as_ref().map(|(_, n)| *n),
        top: top.map(|(value, _)| value),
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

const NUMERIC_ROWS: [&str; 7] = ["mean", "std", "min", "25%", "50%", "75%", "max"];
const CATEGORICAL_ROWS: [&str; 3] = ["unique", "top", "freq"];

impl Summary {
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Row labels and one formatted cell per column, in display order.
    pub fn rows(&self) -> Vec<(&'static str, Vec<String>)> {
        let has_numeric = self
            .columns
            .iter()
            .any(|c| matches!(c.stats, ColumnStats::Numeric(_)));
        let has_categorical = self
            .columns
            .iter()
            .any(|c| matches!(c.stats, ColumnStats::Categorical(_)));

        let mut labels = vec!["count"];
        if has_categorical {
            labels.extend(CATEGORICAL_ROWS);
        }
        if has_numeric {
            labels.extend(NUMERIC_ROWS);
        }

        labels
            .into_iter()
            .map(|label| {
                let cells = self.columns.iter().map(|c| c.stats.cell(label)).collect();
                (label, cells)
            })
            .collect()
    }
}

impl ColumnStats {
    fn cell(&self, label: &str) -> String {
        match self {
            ColumnStats::Numeric(s) => match label {
                "count" => format_number(s.count as f64),
                "mean" => format_number(s.mean),
                "std" => format_number(s.std),
                "min" => format_number(s.min),
                "25%" => format_number(s.q25),
                "50%" => format_number(s.q50),
                "75%" => format_number(s.q75),
                "max" => format_number(s.max),
                _ => "NaN".to_string(),
            },
            ColumnStats::Categorical(s) => match label {
                "count" => s.count.to_string(),
                "unique" => s.unique.to_string(),
                "top" => s.top.clone().unwrap_or_else(|| "NaN".to_string()),
                "freq" => s.freq.map_or_else(|| "NaN".to_string(), |f| f.to_string()),
                _ => "NaN".to_string(),
            },
        }
    }
}

/// At most six decimals, trailing zeros trimmed down to one decimal.
pub(crate) fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{v:.6}");
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Right-aligned text table: a header line, then one line per row label.
pub(crate) fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[&str],
    rows: &[(&str, Vec<String>)],
) -> fmt::Result {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|(_, cells)| cells[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:label_width$}", "")?;
    for (h, w) in headers.iter().zip(widths.iter().copied()) {
        write!(f, "  {h:>w$}")?;
    }
    for (label, cells) in rows {
        writeln!(f)?;
        write!(f, "{label:<label_width$}")?;
        for (cell, w) in cells.iter().zip(widths.iter().copied()) {
            write!(f, "  {cell:>w$}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        write_table(f, &headers, &self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Column {
                    name: "Year".into(),
                    kind: ColumnKind::Integer,
                    cells: vec![
                        CellValue::Integer(2000),
                        CellValue::Integer(2001),
                        CellValue::Integer(2002),
                        CellValue::Integer(2003),
                    ],
                },
                Column {
                    name: "Category".into(),
                    kind: ColumnKind::Text,
                    cells: vec![
                        CellValue::String("b".into()),
                        CellValue::String("a".into()),
                        CellValue::Null,
                        CellValue::String("a".into()),
                    ],
                },
            ],
            4,
        )
    }

    #[test]
    fn numeric_column_statistics() {
        let summary = describe(&dataset());
        let ColumnStats::Numeric(s) = &summary.get("Year").unwrap().stats else {
            panic!("Year should be numeric");
        };
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2001.5);
        assert!((s.std - 1.2909944).abs() < 1e-6);
        assert_eq!(s.min, 2000.0);
        assert_eq!(s.q25, 2000.75);
        assert_eq!(s.q50, 2001.5);
        assert_eq!(s.q75, 2002.25);
        assert_eq!(s.max, 2003.0);
    }

    #[test]
    fn categorical_column_statistics() {
        let summary = describe(&dataset());
        let ColumnStats::Categorical(s) = &summary.get("Category").unwrap().stats else {
            panic!("Category should be categorical");
        };
        assert_eq!(s.count, 3);
        assert_eq!(s.unique, 2);
        assert_eq!(s.top.as_deref(), Some("a"));
        assert_eq!(s.freq, Some(2));
    }

    #[test]
    fn ties_go_to_first_seen_value() {
        let col = Column {
            name: "c".into(),
            kind: ColumnKind::Text,
            cells: vec![
                CellValue::String("x".into()),
                CellValue::String("y".into()),
                CellValue::String("y".into()),
                CellValue::String("x".into()),
            ],
        };
        let s = categorical_stats(&col);
        assert_eq!(s.top.as_deref(), Some("x"));
    }

    #[test]
    fn single_value_and_empty_columns_use_nan_placeholders() {
        let ds = Dataset::new(
            vec![
                Column {
                    name: "one".into(),
                    kind: ColumnKind::Float,
                    cells: vec![CellValue::Float(3.0)],
                },
                Column {
                    name: "none".into(),
                    kind: ColumnKind::Float,
                    cells: vec![CellValue::Null],
                },
            ],
            1,
        );
        let summary = describe(&ds);
        let ColumnStats::Numeric(one) = &summary.columns[0].stats else {
            panic!()
        };
        assert!(one.std.is_nan());
        assert_eq!(one.q75, 3.0);
        let ColumnStats::Numeric(none) = &summary.columns[1].stats else {
            panic!()
        };
        assert_eq!(none.count, 0);
        assert!(none.mean.is_nan());
    }

    #[test]
    fn table_lists_all_row_labels_for_mixed_columns() {
        let text = describe(&dataset()).to_string();
        let labels: Vec<&str> = text
            .lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(
            labels,
            vec!["count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max"]
        );
        assert!(text.lines().next().unwrap().contains("Year"));
        assert!(text.contains("2001.5"));
    }

    #[test]
    fn numeric_only_table_omits_categorical_rows() {
        let ds = Dataset::new(vec![dataset().columns[0].clone()], 4);
        let text = describe(&ds).to_string();
        assert!(!text.contains("unique"));
        assert!(text.contains("mean"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(2.0), "2.0");
        assert_eq!(format_number(1.2909944487), "1.290994");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
