/// Analysis layer: descriptive statistics, correlation and trend.
///
/// ```text
///   Session ──► summary::describe      every column
///           ├─► correlation::correlate  numeric columns (needs ≥ 2)
///           └─► trend::fit_trend        Value on Year (needs both)
/// ```

pub mod correlation;
pub mod summary;
pub mod trend;

use std::fmt;

use crate::data::model::Session;
use correlation::CorrelationOutcome;
use summary::Summary;
use trend::TrendOutcome;

/// Everything the analyzer derives from one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: Summary,
    pub correlation: CorrelationOutcome,
    pub trend: TrendOutcome,
}

pub fn analyze(session: &Session) -> Analysis {
    let dataset = &session.dataset;
    let caps = &session.capabilities;

    let summary = summary::describe(dataset);
    let correlation = correlation::correlate(dataset, caps);
    let trend = trend::fit_trend(dataset, caps);

    log::info!(
        "Analyzed {} rows × {} columns ({} numeric)",
        dataset.len(),
        dataset.columns.len(),
        caps.numeric_columns
    );
    log::debug!("Trend outcome: {trend:?}");

    Analysis {
        summary,
        correlation,
        trend,
    }
}

/// The text appended to the display log.
impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data Summary:")?;
        writeln!(f, "{}\n", self.summary)?;

        match &self.correlation {
            CorrelationOutcome::Matrix(m) => {
                writeln!(f, "Correlation Matrix:")?;
                writeln!(f, "{m}\n")?;
            }
            CorrelationOutcome::NotEnoughNumericData => {
                writeln!(f, "Not enough numeric data for correlation analysis.\n")?;
            }
        }

        match &self.trend {
            TrendOutcome::Coefficient(c) => {
                writeln!(f, "Detected Trend (Year vs Value): {:.2}", c.slope())
            }
            TrendOutcome::ColumnsRequired => {
                writeln!(f, "Year and Value columns are required for trend detection.")
            }
            TrendOutcome::Unavailable(reason) => {
                writeln!(f, "Trend detection unavailable: {reason}.")
            }
        }
    }
}
