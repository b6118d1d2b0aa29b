use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("the video is unavailable; it may be private, removed, or age-restricted")]
    Unavailable,
    #[error("this video is age-restricted and cannot be downloaded")]
    AgeRestricted,
    #[error("could not reach the video host; check your internet connection")]
    NoConnection,
    #[error("invalid request; the video might be private or unavailable in your region")]
    InvalidRequest,
    #[error("access denied; the host may be rate-limiting requests, try again later")]
    RateLimited,
    #[error("error downloading video: {0}")]
    Tool(String),
    #[error("failed to start downloader {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("downloader reported {0} but no such file exists")]
    MissingOutput(PathBuf),
}

impl FetchError {
    /// Map a downloader's failure message to a user-facing error.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("sign in to confirm your age") {
            FetchError::AgeRestricted
        } else if lower.contains("private") || lower.contains("unavailable") {
            FetchError::Unavailable
        } else if lower.contains("unable to download webpage") {
            FetchError::NoConnection
        } else if lower.contains("http error 400") {
            FetchError::InvalidRequest
        } else if lower.contains("http error 403") {
            FetchError::RateLimited
        } else {
            FetchError::Tool(message.trim().to_string())
        }
    }
}
