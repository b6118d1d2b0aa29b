use std::path::PathBuf;

use thiserror::Error;

use super::evaluation_report::EvaluationReport;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for persisting a finished report.
///
/// Returns the location the report was written to. Implementations never
/// overwrite an existing report.
pub trait ReportWriter: Send {
    fn write(&self, report: &EvaluationReport) -> Result<PathBuf, ReportError>;
}
