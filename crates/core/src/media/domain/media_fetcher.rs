use std::path::{Path, PathBuf};

use super::fetch_error::FetchError;

/// Domain interface for fetching a video's audio track to a local file.
pub trait MediaFetcher: Send + Sync {
    /// `source` is a video URL or bare video id. Returns the audio file path.
    fn fetch(&self, source: &str, output_dir: &Path) -> Result<PathBuf, FetchError>;
}
