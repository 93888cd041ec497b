use std::path::{Path, PathBuf};

use crate::data::model::Session;
use crate::pipeline::{DisplayLog, Pipeline};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Idle (no session) → Loaded (session, fresh log) → Processed (log holds
/// results). Loading another file goes back to Loaded.
#[derive(Default)]
pub struct AppState {
    /// Loaded file (None until the user picks one).
    pub session: Option<Session>,

    /// Path shown next to the Browse button.
    pub file_path: Option<PathBuf>,

    /// Text shown in the result area.
    pub log: DisplayLog,

    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            ..Self::default()
        }
    }

    /// Replace the session with a newly loaded file. On failure the previous
    /// session stays usable and the error goes to the log.
    pub fn load_file(&mut self, path: &Path) {
        match self.pipeline.load(path) {
            Ok(session) => {
                self.session = Some(session);
                self.file_path = Some(path.to_path_buf());
                self.log.clear();
                self.log
                    .append(&format!("File loaded: {}\n", path.display()));
            }
            Err(e) => {
                self.log.append(&format!("{e}\n"));
            }
        }
    }

    /// Run the whole pipeline on the current session.
    pub fn process(&mut self) {
        if let Err(e) = self.pipeline.process(self.session.as_ref(), &mut self.log) {
            log::warn!("Processing skipped: {e}");
        }
    }

    pub fn file_label(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}
