use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CellValue – a single parsed CSV cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Used as a grouping key downstream, so `Eq` and `Hash` must agree.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Hash so floats can take part in grouping --

/// Bit pattern used for float equality and hashing; `-0.0` folds into `0.0`.
fn float_key(v: f64) -> u64 {
    if v == 0.0 { 0f64.to_bits() } else { v.to_bits() }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        use CellValue::*;
        match (self, other) {
            (String(a), String(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => float_key(*a) == float_key(*b),
            (Bool(a), Bool(b)) => a == b,
            (Null, Null) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => float_key(*f).hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for statistics and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

/// One named column of the source CSV, one cell per row.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Non-null numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(CellValue::as_f64).collect()
    }

    /// Number of non-null cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_null()).count()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Never mutated after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Columns in header order.
    pub columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, rows: usize) -> Self {
        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Ordered list of column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// First column with exactly this (case-sensitive) name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind.is_numeric())
    }
}

// ---------------------------------------------------------------------------
// Capabilities – which optional analyses the columns allow
// ---------------------------------------------------------------------------

pub const YEAR: &str = "Year";
pub const VALUE: &str = "Value";
pub const CATEGORY: &str = "Category";

/// Whether the per-category chart can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveChart {
    Ready,
    /// Category and Value exist but there is no Year column for the x-axis.
    MissingYear,
    Unavailable,
}

/// Column-presence descriptor computed once per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub has_year: bool,
    pub has_value: bool,
    pub has_category: bool,
    pub numeric_columns: usize,
}

impl Capabilities {
    pub fn detect(dataset: &Dataset) -> Self {
        Capabilities {
            has_year: dataset.column(YEAR).is_some(),
            has_value: dataset.column(VALUE).is_some(),
            has_category: dataset.column(CATEGORY).is_some(),
            numeric_columns: dataset.numeric_columns().count(),
        }
    }

    pub fn can_fit_trend(&self) -> bool {
        self.has_year && self.has_value
    }

    pub fn can_scatter(&self) -> bool {
        self.has_year && self.has_value
    }

    pub fn can_correlate(&self) -> bool {
        self.numeric_columns > 1
    }

    pub fn interactive_chart(&self) -> InteractiveChart {
        match (self.has_category && self.has_value, self.has_year) {
            (true, true) => InteractiveChart::Ready,
            (true, false) => InteractiveChart::MissingYear,
            (false, _) => InteractiveChart::Unavailable,
        }
    }
}

// ---------------------------------------------------------------------------
// Session – one loaded file
// ---------------------------------------------------------------------------

/// A loaded dataset together with its source and capabilities.
/// Replaced wholesale whenever another file is loaded.
#[derive(Debug, Clone)]
pub struct Session {
    pub source: PathBuf,
    pub dataset: Dataset,
    pub capabilities: Capabilities,
}

impl Session {
    pub fn new(source: &Path, dataset: Dataset) -> Self {
        let capabilities = Capabilities::detect(&dataset);
        Session {
            source: source.to_path_buf(),
            dataset,
            capabilities,
        }
    }
}
