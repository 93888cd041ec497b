use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Output locations
// ---------------------------------------------------------------------------

/// Where the three artifacts of a processing run are written.
/// Every stage builds its paths from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub scatter_file: String,
    pub interactive_file: String,
    pub report_file: String,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            scatter_file: "scatter_plot.png".to_string(),
            interactive_file: "interactive_plot.html".to_string(),
            report_file: "data_analysis_report.pdf".to_string(),
        }
    }
}

impl OutputPaths {
    /// Default file names inside another directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn scatter(&self) -> PathBuf {
        self.dir.join(&self.scatter_file)
    }

    pub fn interactive(&self) -> PathBuf {
        self.dir.join(&self.interactive_file)
    }

    pub fn report(&self) -> PathBuf {
        self.dir.join(&self.report_file)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Pixel size of the static scatter image (a 6×4 inch figure at 100 dpi).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub scatter_size: (u32, u32),
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scatter_size: (600, 400),
        }
    }
}
