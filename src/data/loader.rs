use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CellValue, Column, ColumnKind, Dataset};

/// Cell spellings treated as missing values.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Only `.csv` is supported: a header row with column names followed by
/// data rows with at most as many fields. Missing trailing fields are null.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "" => bail!("File has no extension, expected .csv"),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column names come from the header row, column types are inferred from
/// the cells once every row has been read.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("No columns to parse from file");
    }

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        // Row numbers are 1-based and count the header, like a spreadsheet.
        let record = result.with_context(|| format!("CSV row {}", row_no + 2))?;
        if record.len() > headers.len() {
            bail!(
                "CSV row {}: expected {} fields, saw {}",
                row_no + 2,
                headers.len(),
                record.len()
            );
        }
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            let value = record.get(col_idx).unwrap_or("");
            cells.push(if is_missing(value) {
                None
            } else {
                Some(value.to_string())
            });
        }
    }

    let rows = raw.first().map_or(0, Vec::len);
    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| build_column(name, cells))
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn is_missing(s: &str) -> bool {
    NA_VALUES.contains(&s.trim())
}

/// Infer the column kind from all of its cells, then convert every cell
/// to that kind. Mixed columns fall back to text and keep the raw strings.
fn build_column(name: String, raw: Vec<Option<String>>) -> Column {
    let guesses: Vec<CellValue> = raw
        .iter()
        .map(|cell| cell.as_deref().map_or(CellValue::Null, guess_cell_type))
        .collect();

    let kind = infer_kind(&guesses);
    let cells = match kind {
        ColumnKind::Integer | ColumnKind::Bool => guesses,
        ColumnKind::Float => guesses
            .into_iter()
            .map(|c| match c {
                CellValue::Integer(i) => CellValue::Float(i as f64),
                other => other,
            })
            .collect(),
        ColumnKind::Text => raw
            .into_iter()
            .map(|cell| cell.map_or(CellValue::Null, CellValue::String))
            .collect(),
    };

    Column { name, kind, cells }
}

fn infer_kind(cells: &[CellValue]) -> ColumnKind {
    let mut present = cells.iter().filter(|c| !c.is_null()).peekable();
    if present.peek().is_none() {
        return ColumnKind::Float;
    }

    let (mut ints, mut floats, mut bools, mut total) = (0usize, 0usize, 0usize, 0usize);
    for cell in present {
        total += 1;
        match cell {
            CellValue::Integer(_) => ints += 1,
            CellValue::Float(_) => floats += 1,
            CellValue::Bool(_) => bools += 1,
            _ => {}
        }
    }

    if ints == total {
        ColumnKind::Integer
    } else if ints + floats == total {
        ColumnKind::Float
    } else if bools == total {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn guess_cell_type(s: &str) -> CellValue {
    let t = s.trim();
    if let Ok(i) = t.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = t.parse::<f64>() {
        // Any NaN spelling the float parser accepts is a missing value.
        return if f.is_nan() { CellValue::Null } else { CellValue::Float(f) };
    }
    match t {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn infers_column_kinds_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "data.csv",
            "Year,Value,Category,Flag,Mixed\n2000,10,a,true,1\n2001,12.5,b,False,x\n2002,,a,TRUE,2\n",
        );
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names(), vec!["Year", "Value", "Category", "Flag", "Mixed"]);

        let kinds: Vec<ColumnKind> = ds.columns.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Integer,
                ColumnKind::Float,
                ColumnKind::Text,
                ColumnKind::Bool,
                ColumnKind::Text,
            ]
        );

        let value = ds.column("Value").unwrap();
        assert_eq!(value.cells[0], CellValue::Float(10.0));
        assert_eq!(value.cells[2], CellValue::Null);

        let mixed = ds.column("Mixed").unwrap();
        assert_eq!(mixed.cells[0], CellValue::String("1".into()));
    }

    #[test]
    fn all_missing_column_is_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty_col.csv", "a,b\n1,NA\n2,\n");
        let ds = load_file(&path).unwrap();
        let b = ds.column("b").unwrap();
        assert_eq!(b.kind, ColumnKind::Float);
        assert_eq!(b.count(), 0);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "header.csv", "Year,Value\n");
        let ds = load_file(&path).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 2);
    }

    #[test]
    fn short_rows_fill_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "short.csv", "Year,Value,Category\n2000,1\n2001,2,a\n");
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        let category = ds.column("Category").unwrap();
        assert_eq!(category.cells, vec![CellValue::Null, CellValue::String("a".into())]);
        assert_eq!(ds.column("Value").unwrap().count(), 2);
    }

    #[test]
    fn rejects_rows_longer_than_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "long.csv", "a,b\n1,2\n3,4,5\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 3"));
    }

    #[test]
    fn nan_spellings_and_signed_zeros_follow_dataframe_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "nan.csv",
            "Year,Value,Category\n2000,1,1.5\n2001,2,NAN\n2002,3,nAn\n2003,4,0.0\n2004,5,-0.0\n",
        );
        let ds = load_file(&path).unwrap();
        let category = ds.column("Category").unwrap();

        assert_eq!(category.kind, ColumnKind::Float);
        assert_eq!(category.cells[1], CellValue::Null);
        assert_eq!(category.cells[2], CellValue::Null);
        assert_eq!(category.count(), 3);
        assert_eq!(category.numeric_values(), vec![1.5, 0.0, -0.0]);
        assert_eq!(category.cells[3], category.cells[4]);
    }

    #[test]
    fn rejects_missing_file_and_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.csv")).is_err());

        let path = write_csv(&dir, "data.txt", "a\n1\n");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn empty_file_has_no_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "blank.csv", "");
        assert!(load_file(&path).is_err());
    }
}
