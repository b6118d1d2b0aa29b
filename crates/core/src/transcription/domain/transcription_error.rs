use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("audio file not found: {0}")]
    AudioNotFound(PathBuf),
    #[error("failed to read audio {path}: {source}")]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transcription request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transcription service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transcription returned no text")]
    Empty,
}
