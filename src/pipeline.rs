use std::path::Path;

use crate::analysis::{Analysis, analyze};
use crate::config::{OutputPaths, RenderSettings};
use crate::data::loader::load_file;
use crate::data::model::Session;
use crate::error::PipelineError;
use crate::render::{Visuals, visualize};
use crate::report::{ReportOutcome, generate_report};

// ---------------------------------------------------------------------------
// Display log – the text shown in the result area
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLog {
    text: String,
}

impl DisplayLog {
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

// ---------------------------------------------------------------------------
// Pipeline controller
// ---------------------------------------------------------------------------

/// Everything one "Process Data" run produced.
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub analysis: Analysis,
    pub visuals: Visuals,
    /// `None` when the report could not be written.
    pub report: Option<ReportOutcome>,
}

/// Runs Loader → Analyzer → Visualizer → Reporter against a session.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    outputs: OutputPaths,
    render: RenderSettings,
}

impl Pipeline {
    pub fn new(outputs: OutputPaths, render: RenderSettings) -> Self {
        Self { outputs, render }
    }

    pub fn outputs(&self) -> &OutputPaths {
        &self.outputs
    }

    /// Parse a file into a fresh session.
    pub fn load(&self, path: &Path) -> Result<Session, PipelineError> {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.column_names()
                );
                Ok(Session::new(path, dataset))
            }
            Err(source) => {
                log::error!("Failed to load file: {source:#}");
                Err(PipelineError::Load {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Full run: clears `display`, then appends the analysis text and one line
    /// per artifact. Stage failures are written to the log, not returned.
    pub fn process(
        &self,
        session: Option<&Session>,
        display: &mut DisplayLog,
    ) -> Result<ProcessSummary, PipelineError> {
        let Some(session) = session else {
            let err = PipelineError::no_dataset("process");
            display.append(&format!("{err}\n"));
            return Err(err);
        };

        display.clear();
        log::info!("Processing {}", session.source.display());

        let analysis = analyze(session);
        display.append(&analysis.to_string());

        let visuals = visualize(session, &self.outputs, &self.render);
        display.append(&visuals.to_string());

        let report = match generate_report(session, &self.outputs) {
            Ok(outcome) => {
                display.append(&format!(
                    "Report generated and saved as '{}'.\n",
                    self.outputs.report_file
                ));
                Some(outcome)
            }
            Err(e) => {
                log::error!("Report generation failed: {e:#}");
                display.append(&format!("Failed to generate report: {e:#}\n"));
                None
            }
        };

        Ok(ProcessSummary {
            analysis,
            visuals,
            report,
        })
    }

    /// Render the plots on their own.
    pub fn visualize(&self, session: Option<&Session>) -> Result<Visuals, PipelineError> {
        let session = session.ok_or(PipelineError::no_dataset("visualize"))?;
        Ok(visualize(session, &self.outputs, &self.render))
    }

    /// Write the report on its own, from whatever artifacts are on disk.
    pub fn report(&self, session: Option<&Session>) -> Result<ReportOutcome, PipelineError> {
        let session = session.ok_or(PipelineError::no_dataset("generate a report"))?;
        generate_report(session, &self.outputs).map_err(|source| PipelineError::Report { source })
    }
}
