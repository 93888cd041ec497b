use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pipeline controller. None of them is fatal:
/// the window shows the message and stays interactive.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No data to {action}. Please upload a CSV file first.")]
    NoDataset { action: &'static str },

    #[error("Failed to load {}: {source:#}", path.display())]
    Load {
        path: PathBuf,
        source: anyhow::Error,
    },

    #[error("Failed to generate report: {source:#}")]
    Report { source: anyhow::Error },
}

impl PipelineError {
    pub fn no_dataset(action: &'static str) -> Self {
        PipelineError::NoDataset { action }
    }
}
