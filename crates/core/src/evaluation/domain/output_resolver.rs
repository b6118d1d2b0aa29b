use std::path::PathBuf;

use thiserror::Error;

use crate::generation::domain::tone::Tone;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no cached output found for sample {sample_id} in {dir}")]
    MissingCachedOutput { sample_id: String, dir: PathBuf },
    #[error("failed to read cached output {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model call failed for {sample_id}: {message}")]
    Generation { sample_id: String, message: String },
}

/// Inputs available to a resolver for one sample.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub sample_id: &'a str,
    pub transcript: &'a str,
    pub tone: Tone,
}

/// Domain interface for obtaining the generated text of one sample.
pub trait OutputResolver: Send + Sync {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<String, ResolveError>;
}
