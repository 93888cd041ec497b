use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use plotly::common::{Line, Marker, Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};
use serde_json::Value as JsonValue;

use crate::color::generate_palette;
use crate::data::model::{CATEGORY, CellValue, Dataset, VALUE, YEAR};

const CHART_TITLE: &str = "Interactive Plot of Value by Category";

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// The rows of one Category value, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub name: String,
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
}

/// Split Year/Value pairs by Category, in order of first appearance.
/// Rows without a category are left out.
pub fn group_by_category(dataset: &Dataset) -> Result<Vec<CategorySeries>> {
    let category = dataset.column(CATEGORY).context("missing 'Category' column")?;
    let year = dataset.column(YEAR).context("missing 'Year' column")?;
    let value = dataset.column(VALUE).context("missing 'Value' column")?;

    let mut index: HashMap<&CellValue, usize> = HashMap::new();
    let mut series: Vec<CategorySeries> = Vec::new();

    for ((cat, x), y) in category.cells.iter().zip(&year.cells).zip(&value.cells) {
        if cat.is_null() {
            continue;
        }
        let slot = *index.entry(cat).or_insert_with(|| {
            series.push(CategorySeries {
                name: cat.to_string(),
                x: Vec::new(),
                y: Vec::new(),
            });
            series.len() - 1
        });
        series[slot].x.push(x.clone());
        series[slot].y.push(y.clone());
    }

    Ok(series)
}

// ---------------------------------------------------------------------------
// Plotly figure
// ---------------------------------------------------------------------------

fn cell_to_json(cell: &CellValue) -> JsonValue {
    match cell {
        CellValue::Integer(i) => JsonValue::from(*i),
        CellValue::Float(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::String(s) => JsonValue::String(s.clone()),
        CellValue::Null => JsonValue::Null,
    }
}

/// One coloured line-plus-marker trace per series, Year on x and Value on y.
fn figure(series: &[CategorySeries]) -> Plot {
    let mut plot = Plot::new();
    for (s, colour) in series.iter().zip(generate_palette(series.len())) {
        let trace = Scatter::new(
            s.x.iter().map(cell_to_json).collect::<Vec<_>>(),
            s.y.iter().map(cell_to_json).collect::<Vec<_>>(),
        )
        .mode(Mode::LinesMarkers)
        .name(s.name.as_str())
        .line(Line::new().color(colour.to_hex()))
        .marker(Marker::new().color(colour.to_hex()));
        plot.add_trace(trace);
    }
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(CHART_TITLE))
            .x_axis(Axis::new().title(Title::with_text(YEAR)))
            .y_axis(Axis::new().title(Title::with_text(VALUE))),
    );
    plot
}

// ---------------------------------------------------------------------------
// HTML output
// ---------------------------------------------------------------------------

/// Write the chart to a standalone HTML page with plotly.js embedded, so it
/// opens without network access. Returns the number of traces. The page is
/// not opened.
pub fn render_interactive(dataset: &Dataset, path: &Path) -> Result<usize> {
    let series = group_by_category(dataset)?;
    let html = figure(&series).to_html();

    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("Interactive chart with {} series written to {}", series.len(), path.display());
    Ok(series.len())
}
