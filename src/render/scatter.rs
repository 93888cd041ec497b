use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::config::RenderSettings;
use crate::data::model::{Dataset, VALUE, YEAR};

// ---------------------------------------------------------------------------
// Static scatter plot (PNG)
// ---------------------------------------------------------------------------

/// Draw Value against Year as a PNG. Rows where either cell is not a number
/// are left out. Returns the number of points drawn.
///
/// The bitmap backend lives only for the duration of this call and is
/// flushed with `present()` before returning.
pub fn render_scatter(dataset: &Dataset, path: &Path, settings: &RenderSettings) -> Result<usize> {
    let points = year_value_points(dataset)?;

    let root = BitMapBackend::new(path, settings.scatter_size).into_drawing_area();
    root.fill(&WHITE).context("clearing canvas")?;

    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption("Scatter Plot of Year vs Value", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .context("building chart axes")?;

    chart
        .configure_mesh()
        .x_desc(YEAR)
        .y_desc(VALUE)
        .draw()
        .context("drawing grid")?;

    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .context("drawing points")?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;

    log::debug!("Scatter plot with {} points written to {}", points.len(), path.display());
    Ok(points.len())
}

fn year_value_points(dataset: &Dataset) -> Result<Vec<(f64, f64)>> {
    let year = dataset.column(YEAR).context("missing 'Year' column")?;
    let value = dataset.column(VALUE).context("missing 'Value' column")?;

    Ok(year
        .cells
        .iter()
        .zip(&value.cells)
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect())
}

/// Data extent plus 5% on each side; a unit range around a single value.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, ColumnKind};

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
                    ],
                },
                Column {
                    name: "Value".into(),
                    kind: ColumnKind::Float,
                    cells: vec![CellValue::Float(10.0), CellValue::Null, CellValue::Float(14.0)],
                },
            ],
            3,
        )
    }

    #[test]
    fn points_skip_missing_cells() {
        let points = year_value_points(&dataset()).unwrap();
        assert_eq!(points, vec![(2000.0, 10.0), (2002.0, 14.0)]);
    }

    #[test]
    fn ranges_are_padded() {
        assert_eq!(padded_range([5.0, 5.0].into_iter()), 4.0..6.0);
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        let r = padded_range([0.0, 100.0].into_iter());
        assert_eq!(r, -5.0..105.0);
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        let drawn = render_scatter(&dataset(), &path, &RenderSettings::default()).unwrap();
        assert_eq!(drawn, 2);

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (600, 400));
    }
}
