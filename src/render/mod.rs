/// Visualization layer: the static scatter image and the per-category chart.

pub mod interactive;
pub mod scatter;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{OutputPaths, RenderSettings};
use crate::data::model::{InteractiveChart, Session};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    Written(PathBuf),
    /// The columns the plot needs are not there.
    Skipped(String),
    Failed(String),
}

impl PlotOutcome {
    pub fn written(&self) -> Option<&Path> {
        match self {
            PlotOutcome::Written(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

/// What the visualizer produced for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Visuals {
    pub scatter: PlotOutcome,
    pub interactive: PlotOutcome,
}

// ---------------------------------------------------------------------------
// Entry-point
// ---------------------------------------------------------------------------

/// Render both plots the session's columns allow. Render failures are
/// reported in the outcome, never propagated.
pub fn visualize(session: &Session, paths: &OutputPaths, settings: &RenderSettings) -> Visuals {
    let caps = &session.capabilities;
    let dataset = &session.dataset;

    let scatter_path = paths.scatter();
    let scatter = if caps.can_scatter() {
        match scatter::render_scatter(dataset, &scatter_path, settings) {
            Ok(_) => PlotOutcome::Written(scatter_path),
            Err(e) => {
                log::error!("Scatter plot failed: {e:#}");
                PlotOutcome::Failed(format!("{e:#}"))
            }
        }
    } else {
        remove_stale(&scatter_path);
        PlotOutcome::Skipped("Year and Value columns are required".to_string())
    };

    let interactive_path = paths.interactive();
    let interactive = match caps.interactive_chart() {
        InteractiveChart::Ready => {
            match interactive::render_interactive(dataset, &interactive_path) {
                Ok(_) => PlotOutcome::Written(interactive_path),
                Err(e) => {
                    log::error!("Interactive chart failed: {e:#}");
                    PlotOutcome::Failed(format!("{e:#}"))
                }
            }
        }
        InteractiveChart::MissingYear => {
            remove_stale(&interactive_path);
            PlotOutcome::Skipped("a Year column is required for the x-axis".to_string())
        }
        InteractiveChart::Unavailable => {
            remove_stale(&interactive_path);
            PlotOutcome::Skipped("Category and Value columns are required".to_string())
        }
    };

    log::info!("Visualization done: scatter={scatter:?}, interactive={interactive:?}");
    Visuals {
        scatter,
        interactive,
    }
}

/// Delete an artifact left by an earlier dataset so the report can't pick it up.
fn remove_stale(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => log::debug!("Removed stale {}", path.display()),
        Err(e) => log::warn!("Could not remove stale {}: {e}", path.display()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn describe(f: &mut fmt::Formatter<'_>, what: &str, outcome: &PlotOutcome) -> fmt::Result {
    match outcome {
        PlotOutcome::Written(path) => writeln!(f, "{what} saved as '{}'.", file_name(path)),
        PlotOutcome::Skipped(reason) => writeln!(f, "{what} skipped: {reason}."),
        PlotOutcome::Failed(msg) => writeln!(f, "Failed to create {}: {msg}", what.to_lowercase()),
    }
}

impl fmt::Display for Visuals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "Scatter plot", &self.scatter)?;
        describe(f, "Interactive plot", &self.interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, ColumnKind, Dataset};

    fn session(names: &[&str]) -> Session {
        let columns = names
            .iter()
            .map(|name| Column {
                name: name.to_string(),
                kind: if *name == "Category" { ColumnKind::Text } else { ColumnKind::Integer },
                cells: if *name == "Category" {
                    vec![CellValue::String("a".into()), CellValue::String("b".into())]
                } else {
                    vec![CellValue::Integer(1), CellValue::Integer(2)]
                },
            })
            .collect();
        Session::new(Path::new("test.csv"), Dataset::new(columns, 2))
    }

    #[test]
    fn skips_plots_without_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::in_dir(dir.path());
        let visuals = visualize(&session(&["Other"]), &paths, &RenderSettings::default());

        assert!(matches!(visuals.scatter, PlotOutcome::Skipped(_)));
        assert!(matches!(visuals.interactive, PlotOutcome::Skipped(_)));
        assert!(!paths.scatter().exists());
        assert!(!paths.interactive().exists());
    }

    #[test]
    fn interactive_chart_without_year_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::in_dir(dir.path());
        let visuals = visualize(&session(&["Category", "Value"]), &paths, &RenderSettings::default());

        let PlotOutcome::Skipped(reason) = &visuals.interactive else {
            panic!("expected a skip, got {:?}", visuals.interactive);
        };
        assert!(reason.contains("Year"));
        assert!(!paths.interactive().exists());
    }

    #[test]
    fn stale_chart_is_removed_when_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::in_dir(dir.path());
        std::fs::write(paths.interactive(), "old").unwrap();

        visualize(&session(&["Year", "Value"]), &paths, &RenderSettings::default());
        assert!(!paths.interactive().exists());
    }

    #[test]
    fn writes_interactive_chart_with_all_columns() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::in_dir(dir.path());
        let visuals = visualize(
            &session(&["Year", "Category", "Value"]),
            &paths,
            &RenderSettings::default(),
        );
        assert_eq!(visuals.interactive.written(), Some(paths.interactive().as_path()));
        assert!(visuals.to_string().contains("Interactive plot saved as 'interactive_plot.html'."));
    }
}
