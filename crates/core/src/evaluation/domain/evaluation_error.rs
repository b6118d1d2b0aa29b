use std::path::PathBuf;

use thiserror::Error;

use super::output_resolver::ResolveError;
use super::report_writer::ReportError;
use crate::dataset::domain::dataset_error::DatasetError;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("expected file missing for sample {sample_id}: {path}")]
    MissingFile { sample_id: String, path: PathBuf },
    #[error("failed to read {path} for sample {sample_id}: {source}")]
    ReadFile {
        sample_id: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("evaluation worker thread panicked")]
    WorkerPanicked,
}
